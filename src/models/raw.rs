use serde::Deserialize;

/// Listing payload exactly as returned by `GET /listings/{id}`.
///
/// Every field is optional here; the normalizer decides which ones are
/// required. Fields the normalizer does not read are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub id: Option<i64>,
    pub date_listed: Option<String>,
    pub date_updated: Option<String>,
    pub sale_details: Option<RawSaleDetails>,
    pub sale_mode: Option<String>,
    pub price_details: Option<RawPriceDetails>,
    pub inspection_details: Option<RawInspectionDetails>,
    pub seo_url: Option<String>,
    pub address_parts: Option<RawAddressParts>,
    pub geo_location: Option<RawGeoLocation>,
    pub advertiser_identifiers: Option<RawAdvertiserIdentifiers>,
    pub statement_of_information: Option<RawStatementOfInformation>,

    pub bathrooms: Option<f32>,
    pub bedrooms: Option<f32>,
    pub carspaces: Option<u32>,
    pub description: Option<String>,
    pub headline: Option<String>,
    pub is_new_development: Option<bool>,
    #[serde(default)]
    pub property_types: Vec<String>,
    pub land_area_sqm: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSaleDetails {
    pub sale_method: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceDetails {
    pub display_price: Option<String>,
    /// Canonical price, only present when the agent published one
    pub price: Option<u64>,
    pub minimum_price: Option<u64>,
    pub maximum_price: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInspectionDetails {
    pub is_by_appointment_only: Option<bool>,
}

/// How much of the address the advertiser chose to publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayType {
    FullAddress,
    SuburbOnly,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddressParts {
    pub display_type: DisplayType,
    pub state_abbreviation: Option<String>,
    pub street_number: Option<String>,
    pub unit_number: Option<String>,
    pub street: Option<String>,
    pub suburb: Option<String>,
    pub postcode: Option<String>,
    pub display_address: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawGeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAdvertiserIdentifiers {
    pub advertiser_type: Option<String>,
    pub advertiser_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatementOfInformation {
    pub documentation_url: Option<String>,
}

pub mod flat;
pub mod raw;

use crate::error::{ConstructionError, NormalizationError};
use chrono::{DateTime, Utc};
use raw::{DisplayType, RawAddressParts, RawAdvertiserIdentifiers, RawGeoLocation, RawListing};
use serde::{Deserialize, Serialize};

pub use flat::{flatten, FlatRecord};

/// Advertiser responsible for a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub advertiser_type: String,
    pub advertiser_id: i64,
}

impl Agent {
    /// Build an agent from the listing's `advertiserIdentifiers` block.
    pub fn from_raw(
        identifiers: Option<&RawAdvertiserIdentifiers>,
    ) -> Result<Self, ConstructionError> {
        let identifiers = identifiers.ok_or(ConstructionError::NoAdvertiser)?;
        let advertiser_type = identifiers
            .advertiser_type
            .clone()
            .ok_or(ConstructionError::IncompleteIdentifiers("advertiserType"))?;
        let advertiser_id = identifiers
            .advertiser_id
            .ok_or(ConstructionError::IncompleteIdentifiers("advertiserId"))?;

        Ok(Self {
            advertiser_type,
            advertiser_id,
        })
    }

    pub fn from_fields(advertiser_type: impl Into<String>, advertiser_id: i64) -> Self {
        Self {
            advertiser_type: advertiser_type.into(),
            advertiser_id,
        }
    }
}

/// Where a property is.
///
/// Street-level fields stay `None` when the advertiser only published the
/// suburb, so "no street number" and "not disclosed" remain distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseLocation {
    pub state: Option<String>,
    pub street_number: Option<String>,
    pub unit_number: Option<String>,
    pub street: Option<String>,
    pub suburb: Option<String>,
    pub postcode: Option<String>,
    pub display_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Street-level part of a full address
#[derive(Debug, Clone, PartialEq)]
pub struct StreetAddress {
    pub street_number: Option<String>,
    pub unit_number: Option<String>,
    pub street: String,
}

impl HouseLocation {
    pub fn from_raw(
        address: Option<&RawAddressParts>,
        geo: Option<&RawGeoLocation>,
    ) -> Result<Self, NormalizationError> {
        let coordinates = geo.map(|geo| (geo.latitude, geo.longitude));
        let Some(address) = address else {
            return Ok(Self::unaddressed(coordinates));
        };

        let street = match address.display_type {
            DisplayType::FullAddress => Some(StreetAddress {
                street_number: address.street_number.clone(),
                unit_number: address.unit_number.clone(),
                street: required(&address.street, "addressParts.street")?,
            }),
            DisplayType::SuburbOnly => None,
            DisplayType::Unknown => return Ok(Self::unaddressed(coordinates)),
        };

        Ok(Self::from_fields(
            &required(&address.state_abbreviation, "addressParts.stateAbbreviation")?,
            required(&address.suburb, "addressParts.suburb")?,
            required(&address.postcode, "addressParts.postcode")?,
            required(&address.display_address, "addressParts.displayAddress")?,
            street,
            coordinates,
        ))
    }

    /// Build a location from explicit parts. `street` is `None` for a
    /// suburb-only address; `coordinates` is `(latitude, longitude)`.
    pub fn from_fields(
        state: &str,
        suburb: impl Into<String>,
        postcode: impl Into<String>,
        display_address: impl Into<String>,
        street: Option<StreetAddress>,
        coordinates: Option<(f64, f64)>,
    ) -> Self {
        let mut location = Self::unaddressed(coordinates);
        location.state = Some(state.to_uppercase());
        location.suburb = Some(suburb.into());
        location.postcode = Some(postcode.into());
        location.display_address = Some(display_address.into());
        if let Some(street) = street {
            location.street_number = street.street_number;
            location.unit_number = street.unit_number;
            location.street = Some(street.street);
        }
        location
    }

    fn unaddressed(coordinates: Option<(f64, f64)>) -> Self {
        Self {
            latitude: coordinates.map(|(latitude, _)| latitude),
            longitude: coordinates.map(|(_, longitude)| longitude),
            ..Self::default()
        }
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, NormalizationError> {
    value.clone().ok_or(NormalizationError::missing(field))
}

/// Structural details of the property itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseDetails {
    pub bathrooms: f32,
    pub bedrooms: f32,
    pub carspaces: u32,
    pub description: String,
    pub headline: String,
    pub is_new_development: bool,
    pub property_type: String,
    pub land_area_sqm: Option<f64>,
}

impl HouseDetails {
    pub fn from_raw(raw: &RawListing) -> Result<Self, NormalizationError> {
        Ok(Self {
            bathrooms: raw.bathrooms.ok_or(NormalizationError::missing("bathrooms"))?,
            bedrooms: raw.bedrooms.ok_or(NormalizationError::missing("bedrooms"))?,
            carspaces: raw.carspaces.ok_or(NormalizationError::missing("carspaces"))?,
            description: raw
                .description
                .clone()
                .ok_or(NormalizationError::missing("description"))?,
            headline: raw
                .headline
                .clone()
                .ok_or(NormalizationError::missing("headline"))?,
            is_new_development: raw
                .is_new_development
                .ok_or(NormalizationError::missing("isNewDevelopment"))?,
            property_type: raw
                .property_types
                .first()
                .cloned()
                .ok_or(NormalizationError::missing("propertyTypes"))?,
            land_area_sqm: raw.land_area_sqm,
        })
    }
}

/// How a listing's price was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceResolution {
    /// A single price was published
    Fixed(u64),
    Range { min: u64, max: u64 },
    /// No machine readable price, e.g. "Contact Agent"
    Unpriced,
}

impl PriceResolution {
    /// `(minimumPrice, maximumPrice)` as stored on a listing
    pub fn bounds(self) -> (Option<u64>, Option<u64>) {
        match self {
            Self::Fixed(price) => (Some(price), Some(price)),
            Self::Range { min, max } => (Some(min), Some(max)),
            Self::Unpriced => (None, None),
        }
    }
}

/// A normalized listing, ready to be flattened for storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "listing_id")]
    pub listing_id: i64,
    /// When this listing was captured, not when it was published
    pub created: DateTime<Utc>,
    pub date_listed: String,
    pub date_updated: String,
    pub sale_method: String,
    pub sale_mode: String,
    pub display_price: String,
    pub minimum_price: Option<u64>,
    pub maximum_price: Option<u64>,
    /// How `minimum_price`/`maximum_price` were arrived at
    pub pricing: PriceResolution,
    pub inspections_by_appointment_only: Option<bool>,
    pub url: String,
    pub statement_of_information: Option<String>,
    pub location: HouseLocation,
    pub house: HouseDetails,
    pub agent: Agent,
}

/// Scalar listing fields that come straight from the payload
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFields {
    pub listing_id: i64,
    pub date_listed: String,
    pub date_updated: String,
    pub sale_method: String,
    pub sale_mode: String,
    pub display_price: String,
    pub inspections_by_appointment_only: Option<bool>,
    pub url: String,
    pub statement_of_information: Option<String>,
}

impl Listing {
    /// Assemble a listing captured now, with price bounds taken from `pricing`.
    pub fn from_fields(
        fields: ListingFields,
        pricing: PriceResolution,
        location: HouseLocation,
        house: HouseDetails,
        agent: Agent,
    ) -> Self {
        let (minimum_price, maximum_price) = pricing.bounds();
        Self {
            listing_id: fields.listing_id,
            created: Utc::now(),
            date_listed: fields.date_listed,
            date_updated: fields.date_updated,
            sale_method: fields.sale_method,
            sale_mode: fields.sale_mode,
            display_price: fields.display_price,
            minimum_price,
            maximum_price,
            pricing,
            inspections_by_appointment_only: fields.inspections_by_appointment_only,
            url: fields.url,
            statement_of_information: fields.statement_of_information,
            location,
            house,
            agent,
        }
    }

    pub fn pricing(&self) -> PriceResolution {
        self.pricing
    }

    pub fn flatten(&self) -> FlatRecord {
        flatten(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(display_type: DisplayType) -> RawAddressParts {
        RawAddressParts {
            display_type,
            state_abbreviation: Some("vic".to_string()),
            street_number: Some("12C".to_string()),
            unit_number: None,
            street: Some("Melrose Street".to_string()),
            suburb: Some("Mordialloc".to_string()),
            postcode: Some("3195".to_string()),
            display_address: Some("12C Melrose Street, Mordialloc VIC 3195".to_string()),
        }
    }

    #[test]
    fn agent_from_identifiers() {
        let identifiers = RawAdvertiserIdentifiers {
            advertiser_type: Some("agency".to_string()),
            advertiser_id: Some(5600),
        };
        let agent = Agent::from_raw(Some(&identifiers)).unwrap();
        assert_eq!(agent, Agent::from_fields("agency", 5600));
    }

    #[test]
    fn agent_without_any_input_is_rejected() {
        assert_eq!(
            Agent::from_raw(None),
            Err(ConstructionError::NoAdvertiser)
        );
    }

    #[test]
    fn agent_with_partial_identifiers_is_rejected() {
        let identifiers = RawAdvertiserIdentifiers {
            advertiser_type: Some("agency".to_string()),
            advertiser_id: None,
        };
        assert_eq!(
            Agent::from_raw(Some(&identifiers)),
            Err(ConstructionError::IncompleteIdentifiers("advertiserId"))
        );
    }

    #[test]
    fn full_address_populates_street_fields() {
        let geo = RawGeoLocation {
            latitude: -37.999497,
            longitude: 145.086221,
        };
        let location =
            HouseLocation::from_raw(Some(&address(DisplayType::FullAddress)), Some(&geo)).unwrap();

        assert_eq!(location.state.as_deref(), Some("VIC"));
        assert_eq!(location.street_number.as_deref(), Some("12C"));
        assert_eq!(location.street.as_deref(), Some("Melrose Street"));
        assert_eq!(location.unit_number, None);
        assert_eq!(location.latitude, Some(-37.999497));
        assert_eq!(location.longitude, Some(145.086221));
    }

    #[test]
    fn suburb_only_leaves_street_fields_absent() {
        let location =
            HouseLocation::from_raw(Some(&address(DisplayType::SuburbOnly)), None).unwrap();

        assert_eq!(location.street_number, None);
        assert_eq!(location.street, None);
        assert_eq!(location.suburb.as_deref(), Some("Mordialloc"));
        assert_eq!(location.postcode.as_deref(), Some("3195"));
        assert_eq!(location.latitude, None);
        assert_eq!(location.longitude, None);
    }

    #[test]
    fn missing_address_block_leaves_location_empty() {
        let location = HouseLocation::from_raw(None, None).unwrap();
        assert_eq!(location, HouseLocation::default());
    }

    #[test]
    fn full_address_without_street_is_an_error() {
        let mut parts = address(DisplayType::FullAddress);
        parts.street = None;
        let err = HouseLocation::from_raw(Some(&parts), None).unwrap_err();
        assert!(matches!(
            err,
            NormalizationError::MissingField { field: "addressParts.street" }
        ));
    }

    #[test]
    fn location_from_fields_matches_raw() {
        let geo = RawGeoLocation {
            latitude: -37.999497,
            longitude: 145.086221,
        };
        let street = StreetAddress {
            street_number: Some("12C".to_string()),
            unit_number: None,
            street: "Melrose Street".to_string(),
        };
        let built = HouseLocation::from_fields(
            "vic",
            "Mordialloc",
            "3195",
            "12C Melrose Street, Mordialloc VIC 3195",
            Some(street),
            Some((-37.999497, 145.086221)),
        );

        assert_eq!(
            built,
            HouseLocation::from_raw(Some(&address(DisplayType::FullAddress)), Some(&geo)).unwrap()
        );
    }

    #[test]
    fn suburb_only_from_fields_has_no_street() {
        let location = HouseLocation::from_fields(
            "vic",
            "Mordialloc",
            "3195",
            "Mordialloc, VIC 3195",
            None,
            None,
        );

        assert_eq!(location.state.as_deref(), Some("VIC"));
        assert_eq!(location.street, None);
        assert_eq!(location.street_number, None);
        assert_eq!(location.latitude, None);
    }

    #[test]
    fn unknown_display_type_keeps_coordinates_only() {
        let geo = RawGeoLocation {
            latitude: -38.1,
            longitude: 144.3,
        };
        let location =
            HouseLocation::from_raw(Some(&address(DisplayType::Unknown)), Some(&geo)).unwrap();

        assert_eq!(location.suburb, None);
        assert_eq!(location.latitude, Some(-38.1));
        assert_eq!(location.longitude, Some(144.3));
    }

    #[test]
    fn listing_from_fields_keeps_resolved_pricing() {
        let fields = ListingFields {
            listing_id: 1,
            date_listed: "2021-09-24T06:43:18Z".to_string(),
            date_updated: "2021-09-27T22:29:18.3Z".to_string(),
            sale_method: "privateTreaty".to_string(),
            sale_mode: "buy".to_string(),
            display_price: "$600,000 - $600,000".to_string(),
            inspections_by_appointment_only: None,
            url: "https://www.domain.com.au/1".to_string(),
            statement_of_information: None,
        };
        let house = HouseDetails {
            bathrooms: 1.0,
            bedrooms: 2.0,
            carspaces: 1,
            description: "Unit".to_string(),
            headline: "Unit".to_string(),
            is_new_development: false,
            property_type: "unit".to_string(),
            land_area_sqm: None,
        };
        let pricing = PriceResolution::Range {
            min: 600_000,
            max: 600_000,
        };

        let listing = Listing::from_fields(
            fields,
            pricing,
            HouseLocation::default(),
            house,
            Agent::from_fields("agency", 5600),
        );

        assert_eq!(listing.pricing(), pricing);
        assert_eq!(listing.minimum_price, Some(600_000));
        assert_eq!(listing.maximum_price, Some(600_000));
    }

    #[test]
    fn bounds_of_each_resolution() {
        assert_eq!(PriceResolution::Fixed(5).bounds(), (Some(5), Some(5)));
        assert_eq!(
            PriceResolution::Range { min: 1, max: 2 }.bounds(),
            (Some(1), Some(2))
        );
        assert_eq!(PriceResolution::Unpriced.bounds(), (None, None));
    }
}

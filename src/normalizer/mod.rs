pub mod price;

use crate::error::NormalizationError;
use crate::models::raw::{RawListing, RawPriceDetails};
use crate::models::{Agent, HouseDetails, HouseLocation, Listing, ListingFields, PriceResolution};

const CURRENCY: char = '$';

/// Normalize a listing payload straight from the API.
pub fn normalize_value(raw: serde_json::Value) -> Result<Listing, NormalizationError> {
    let raw: RawListing = serde_json::from_value(raw)?;
    normalize(&raw)
}

/// Turn a raw listing into a [`Listing`], stamping it with the capture time.
pub fn normalize(raw: &RawListing) -> Result<Listing, NormalizationError> {
    let listing_id = raw.id.ok_or(NormalizationError::missing("id"))?;
    let sale_method = raw
        .sale_details
        .as_ref()
        .and_then(|s| s.sale_method.clone())
        .ok_or(NormalizationError::missing("saleDetails.saleMethod"))?;
    let price_details = raw
        .price_details
        .as_ref()
        .ok_or(NormalizationError::missing("priceDetails"))?;
    let display_price = price_details
        .display_price
        .clone()
        .ok_or(NormalizationError::missing("priceDetails.displayPrice"))?;

    let location = HouseLocation::from_raw(raw.address_parts.as_ref(), raw.geo_location.as_ref())?;
    let house = HouseDetails::from_raw(raw)?;
    let agent = Agent::from_raw(raw.advertiser_identifiers.as_ref())?;

    let pricing = resolve_price(price_details, &display_price)?;

    let fields = ListingFields {
        listing_id,
        date_listed: raw
            .date_listed
            .clone()
            .ok_or(NormalizationError::missing("dateListed"))?,
        date_updated: raw
            .date_updated
            .clone()
            .ok_or(NormalizationError::missing("dateUpdated"))?,
        sale_method,
        sale_mode: raw
            .sale_mode
            .clone()
            .ok_or(NormalizationError::missing("saleMode"))?,
        display_price,
        inspections_by_appointment_only: raw
            .inspection_details
            .as_ref()
            .and_then(|i| i.is_by_appointment_only),
        url: raw
            .seo_url
            .clone()
            .ok_or(NormalizationError::missing("seoUrl"))?,
        statement_of_information: raw
            .statement_of_information
            .as_ref()
            .and_then(|s| s.documentation_url.clone()),
    };

    Ok(Listing::from_fields(fields, pricing, location, house, agent))
}

/// Pick the listing's price bounds.
///
/// A canonical `price` wins. Otherwise the display text is parsed: one `$`
/// means a single price, two or more a range where the API's own
/// `minimumPrice`/`maximumPrice` take precedence over the text. Text with no
/// `$` at all ("Contact Agent") is [`PriceResolution::Unpriced`].
pub fn resolve_price(
    details: &RawPriceDetails,
    display_price: &str,
) -> Result<PriceResolution, NormalizationError> {
    if let Some(price) = details.price {
        return Ok(PriceResolution::Fixed(price));
    }

    let currency_symbols = display_price.matches(CURRENCY).count();
    if currency_symbols == 0 {
        return Ok(PriceResolution::Unpriced);
    }
    if currency_symbols < 2 {
        return Ok(PriceResolution::Fixed(price::minimum(display_price)?));
    }

    let (min, max) = match (details.minimum_price, details.maximum_price) {
        (Some(min), Some(max)) => (min, max),
        (None, None) => price::min_max(display_price)?,
        (min, max) => (
            min.map_or_else(|| price::minimum(display_price), Ok)?,
            max.map_or_else(|| price::maximum(display_price), Ok)?,
        ),
    };

    Ok(PriceResolution::Range { min, max })
}

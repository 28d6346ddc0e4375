use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Largest page the search endpoint will return
pub const MAX_PAGE_SIZE: u32 = 200;

/// Kind of listing to search for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingType {
    Sale,
    Rent,
    Sold,
}

impl FromStr for ListingType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sale" => Ok(Self::Sale),
            "Rent" => Ok(Self::Rent),
            "Sold" => Ok(Self::Sold),
            other => anyhow::bail!("unknown listing type: {other}"),
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sale => "Sale",
            Self::Rent => "Rent",
            Self::Sold => "Sold",
        };
        f.write_str(name)
    }
}

/// One postcode filter in a search request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFilter {
    pub post_code: String,
    pub include_surrounding_suburbs: bool,
}

/// Body of a residential search request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub listing_type: ListingType,
    pub page_size: u32,
    pub page_number: u32,
    pub locations: Vec<LocationFilter>,
}

/// One page of raw search results plus the pagination headers that came with it
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub listings: Vec<Value>,
    /// `X-Total-Count`
    pub total_count: u64,
    /// `X-Pagination-PageNumber`
    pub page_number: u32,
}

pub fn build_location_parameter<S: AsRef<str>>(postcodes: &[S]) -> Vec<LocationFilter> {
    postcodes
        .iter()
        .map(|postcode| LocationFilter {
            post_code: postcode.as_ref().to_string(),
            include_surrounding_suburbs: false,
        })
        .collect()
}

pub fn build_query<S: AsRef<str>>(
    postcodes: &[S],
    listing_type: ListingType,
    page_size: u32,
    page_number: u32,
) -> SearchQuery {
    SearchQuery {
        listing_type,
        page_size,
        page_number,
        locations: build_location_parameter(postcodes),
    }
}

/// Id of a search result, if it is a single listing rather than a project.
pub fn search_result_listing_id(result: &Value) -> Option<i64> {
    result.get("listing")?.get("id")?.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn location_parameter() {
        assert_eq!(
            serde_json::to_value(build_location_parameter(&["3228", "3227"])).unwrap(),
            json!([
                { "postCode": "3228", "includeSurroundingSuburbs": false },
                { "postCode": "3227", "includeSurroundingSuburbs": false }
            ])
        );
    }

    #[test]
    fn query_body() {
        let query = build_query(&["3228", "3227"], ListingType::Sale, MAX_PAGE_SIZE, 1);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "listingType": "Sale",
                "pageSize": 200,
                "pageNumber": 1,
                "locations": [
                    { "postCode": "3228", "includeSurroundingSuburbs": false },
                    { "postCode": "3227", "includeSurroundingSuburbs": false }
                ]
            })
        );
    }

    #[test]
    fn listing_type_round_trips_through_text() {
        for kind in [ListingType::Sale, ListingType::Rent, ListingType::Sold] {
            assert_eq!(kind.to_string().parse::<ListingType>().unwrap(), kind);
        }
        assert!("Lease".parse::<ListingType>().is_err());
    }

    #[test]
    fn listing_ids_from_search_results() {
        let listing = json!({ "type": "PropertyListing", "listing": { "id": 2017278297 } });
        let project = json!({ "type": "Project", "project": { "id": 3001 } });

        assert_eq!(search_result_listing_id(&listing), Some(2017278297));
        assert_eq!(search_result_listing_id(&project), None);
    }
}

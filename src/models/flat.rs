//! Single level projection of a [`Listing`] for tabular storage.

use super::{Agent, HouseDetails, HouseLocation, Listing};
use chrono::SecondsFormat;
use serde_json::{Map, Value};

/// Flat `key -> scalar` record. Keys keep traversal order.
pub type FlatRecord = Map<String, Value>;

const SEPARATOR: char = '_';

/// Entities that contribute scalar columns to a flat record.
trait FlatFields {
    fn flat_fields(&self) -> Vec<(&'static str, Value)>;
}

impl FlatFields for HouseLocation {
    fn flat_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("state", self.state.clone().into()),
            ("streetNumber", self.street_number.clone().into()),
            ("unitNumber", self.unit_number.clone().into()),
            ("street", self.street.clone().into()),
            ("suburb", self.suburb.clone().into()),
            ("postcode", self.postcode.clone().into()),
            ("displayAddress", self.display_address.clone().into()),
            ("latitude", self.latitude.into()),
            ("longitude", self.longitude.into()),
        ]
    }
}

impl FlatFields for HouseDetails {
    fn flat_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("bathrooms", self.bathrooms.into()),
            ("bedrooms", self.bedrooms.into()),
            ("carspaces", self.carspaces.into()),
            ("description", self.description.clone().into()),
            ("headline", self.headline.clone().into()),
            ("isNewDevelopment", self.is_new_development.into()),
            ("propertyType", self.property_type.clone().into()),
            ("landAreaSqm", self.land_area_sqm.into()),
        ]
    }
}

impl FlatFields for Agent {
    fn flat_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("advertiserType", self.advertiser_type.clone().into()),
            ("advertiserId", self.advertiser_id.into()),
        ]
    }
}

impl FlatFields for Listing {
    fn flat_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("listing_id", self.listing_id.into()),
            (
                "created",
                self.created
                    .to_rfc3339_opts(SecondsFormat::Micros, true)
                    .into(),
            ),
            ("dateListed", self.date_listed.clone().into()),
            ("dateUpdated", self.date_updated.clone().into()),
            ("saleMethod", self.sale_method.clone().into()),
            ("saleMode", self.sale_mode.clone().into()),
            ("displayPrice", self.display_price.clone().into()),
            ("minimumPrice", self.minimum_price.into()),
            ("maximumPrice", self.maximum_price.into()),
            (
                "inspectionsByAppointmentOnly",
                self.inspections_by_appointment_only.into(),
            ),
            ("url", self.url.clone().into()),
            (
                "statementOfInformation",
                self.statement_of_information.clone().into(),
            ),
        ]
    }
}

/// Flatten a listing, prefixing nested columns with their parent's name
/// (`location_postcode`, `agent_advertiserId`, ...).
pub fn flatten(listing: &Listing) -> FlatRecord {
    let mut record = FlatRecord::new();

    for (key, value) in listing.flat_fields() {
        record.insert(key.to_string(), value);
    }

    let children: [(&str, &dyn FlatFields); 3] = [
        ("location", &listing.location),
        ("house", &listing.house),
        ("agent", &listing.agent),
    ];
    for (parent, child) in children {
        for (key, value) in child.flat_fields() {
            record.insert(format!("{parent}{SEPARATOR}{key}"), value);
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceResolution;
    use chrono::Utc;

    fn listing() -> Listing {
        Listing {
            listing_id: 2017278297,
            created: Utc::now(),
            date_listed: "2021-09-24T06:43:18Z".to_string(),
            date_updated: "2021-09-27T22:29:18.3Z".to_string(),
            sale_method: "auction".to_string(),
            sale_mode: "buy".to_string(),
            display_price: "$950,000 - $1,050,000".to_string(),
            minimum_price: Some(950_000),
            maximum_price: Some(1_050_000),
            pricing: PriceResolution::Range {
                min: 950_000,
                max: 1_050_000,
            },
            inspections_by_appointment_only: None,
            url: "https://www.domain.com.au/listing".to_string(),
            statement_of_information: None,
            location: HouseLocation {
                state: Some("VIC".to_string()),
                suburb: Some("Mordialloc".to_string()),
                postcode: Some("3195".to_string()),
                ..HouseLocation::default()
            },
            house: HouseDetails {
                bathrooms: 2.0,
                bedrooms: 3.0,
                carspaces: 2,
                description: "Modern unit".to_string(),
                headline: "Enjoy, Invest, Best Of Both!".to_string(),
                is_new_development: false,
                property_type: "house".to_string(),
                land_area_sqm: None,
            },
            agent: Agent::from_fields("agency", 5600),
        }
    }

    #[test]
    fn nested_entities_are_prefixed() {
        let record = flatten(&listing());

        assert_eq!(record["location_postcode"], Value::from("3195"));
        assert_eq!(record["house_propertyType"], Value::from("house"));
        assert_eq!(record["agent_advertiserId"], Value::from(5600));
        assert_eq!(record["minimumPrice"], Value::from(950_000u64));
        assert!(!record.contains_key("location"));
    }

    #[test]
    fn absent_fields_become_null() {
        let record = flatten(&listing());

        assert_eq!(record["location_streetNumber"], Value::Null);
        assert_eq!(record["location_latitude"], Value::Null);
        assert_eq!(record["house_landAreaSqm"], Value::Null);
        assert_eq!(record["inspectionsByAppointmentOnly"], Value::Null);
    }

    #[test]
    fn no_value_is_nested() {
        let record = flatten(&listing());
        assert!(record.values().all(|v| !v.is_object() && !v.is_array()));
    }

    #[test]
    fn key_order_follows_traversal() {
        let record = flatten(&listing());
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();

        assert_eq!(keys.first(), Some(&"listing_id"));
        assert_eq!(keys.last(), Some(&"agent_advertiserId"));
        let location = keys.iter().position(|k| *k == "location_state").unwrap();
        let house = keys.iter().position(|k| *k == "house_bathrooms").unwrap();
        assert!(location < house);
        assert_eq!(keys.len(), 12 + 9 + 8 + 2);
    }
}

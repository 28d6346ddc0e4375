//! Domain listing ingestion: search by postcode, normalize each new listing
//! into a flat record and keep it in a document store.

pub mod config;
pub mod domain_api;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod store;

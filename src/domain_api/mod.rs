pub mod client;
pub mod pagination;
pub mod traits;
pub mod types;

pub use client::DomainClient;
pub use pagination::search_all;
pub use traits::DomainApi;
pub use types::{search_result_listing_id, ListingType, MAX_PAGE_SIZE};

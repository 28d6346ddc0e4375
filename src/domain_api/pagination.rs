use crate::domain_api::traits::DomainApi;
use crate::domain_api::types::{build_query, ListingType};
use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

/// Whether another search page is needed after `current_page_number`.
///
/// There are `ceil(total_count / page_size)` pages; the search stops once the
/// last one has been read. An empty result set or a zero page size never
/// needs another page.
pub fn should_fetch_next_page(total_count: u64, current_page_number: u32, page_size: u32) -> bool {
    if total_count == 0 || page_size == 0 {
        return false;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u64::from(current_page_number) != pages
}

/// Collect every search result for `postcodes`, one page at a time.
pub async fn search_all<S: AsRef<str>>(
    api: &dyn DomainApi,
    postcodes: &[S],
    listing_type: ListingType,
    page_size: u32,
) -> Result<Vec<Value>> {
    let mut query = build_query(postcodes, listing_type, page_size, 1);
    let mut listings = Vec::new();

    loop {
        debug!("Requesting search page {}", query.page_number);
        let page = api.search_page(&query).await?;

        if page.listings.is_empty() {
            if page.total_count > listings.len() as u64 {
                warn!(
                    "Page {} came back empty with {} of {} results collected",
                    page.page_number,
                    listings.len(),
                    page.total_count
                );
            }
            break;
        }
        listings.extend(page.listings);

        if !should_fetch_next_page(page.total_count, page.page_number, page_size) {
            break;
        }
        query.page_number += 1;
    }

    Ok(listings)
}

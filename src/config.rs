use crate::domain_api::{ListingType, MAX_PAGE_SIZE};
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "https://api.domain.com.au/v1";

// Torquay, Barwon Heads, Ocean Grove, Anglesea, Aireys Inlet,
// Geelong, Geelong West, Mordialloc
const DEFAULT_POSTCODES: &str = "3228,3227,3226,3230,3231,3220,3218,3195";

/// Run configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub postcodes: Vec<String>,
    pub listing_type: ListingType,
    pub page_size: u32,
    pub store_dir: PathBuf,
    pub detail_concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let config = Self {
            api_key: env::var("DOMAIN_API_KEY").context("DOMAIN_API_KEY must be set")?,
            api_url: env::var("DOMAIN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            postcodes: parse_postcodes(
                &env::var("POSTCODES").unwrap_or_else(|_| DEFAULT_POSTCODES.to_string()),
            ),
            listing_type: env::var("LISTING_TYPE")
                .unwrap_or_else(|_| "Sale".to_string())
                .parse()?,
            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| MAX_PAGE_SIZE.to_string())
                .parse()
                .context("PAGE_SIZE must be a valid number")?,
            store_dir: env::var("STORE_DIR")
                .unwrap_or_else(|_| "store".to_string())
                .into(),
            detail_concurrency: env::var("DETAIL_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .context("DETAIL_CONCURRENCY must be a valid number")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.postcodes.is_empty() {
            anyhow::bail!("POSTCODES must name at least one postcode");
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            anyhow::bail!("PAGE_SIZE must be between 1 and {MAX_PAGE_SIZE}");
        }
        if self.detail_concurrency == 0 {
            anyhow::bail!("DETAIL_CONCURRENCY must be at least 1");
        }
        Ok(())
    }
}

fn parse_postcodes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|postcode| !postcode.is_empty())
        .map(str::to_string)
        .collect()
}

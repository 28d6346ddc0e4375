use domain_scout::config::Config;
use domain_scout::domain_api::DomainClient;
use domain_scout::pipeline;
use domain_scout::store::JsonFileStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    info!("🏠 Domain Scout");
    info!(
        "Searching {} listings in postcodes {}",
        config.listing_type,
        config.postcodes.join(", ")
    );

    let api = Arc::new(DomainClient::new(&config.api_url, &config.api_key)?);
    let store = Arc::new(JsonFileStore::new(&config.store_dir));

    let summary = pipeline::run(api, store, &config).await?;

    info!(
        "💾 Saved {} new listings to {} ({} failed)",
        summary.stored,
        config.store_dir.display(),
        summary.failed
    );

    Ok(())
}

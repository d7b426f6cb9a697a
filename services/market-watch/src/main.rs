use market_watch::config::WatchConfig;
use market_watch::favorites::FavoritesStore;
use market_watch::pipeline::PipelineContext;
use market_watch::scheduler::PollScheduler;
use market_watch::sources::{HttpContractCatalog, HttpSnapshotSource};
use market_watch::whitelist;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!(version = market_watch::SERVICE_VERSION, "starting market-watch service");

    let config = WatchConfig::from_env();
    let client = reqwest::Client::new();

    // Whitelist bootstrap is fatal: without it every listing would be
    // filtered out with no indication why.
    let catalog = HttpContractCatalog::new(client.clone(), config.catalog_url.clone());
    let whitelist = match whitelist::synchronize(&catalog).await {
        Ok(whitelist) => whitelist,
        Err(err) => {
            tracing::error!(error = %err, "whitelist bootstrap failed, exiting");
            return Err(err.into());
        }
    };

    let favorites = FavoritesStore::load(&config.favorites_path);
    let snapshot = HttpSnapshotSource::new(client, config.snapshot_url.clone());
    let ctx = PipelineContext::new(
        whitelist,
        favorites,
        Box::new(snapshot),
        config.pages,
        config.per_page,
    );

    PollScheduler::new(ctx, config.poll_interval).run().await;
    Ok(())
}

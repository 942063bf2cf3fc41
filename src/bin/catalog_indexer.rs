//! # Catalog Indexer
//!
//! Copies the engine's process listing into the search index used by the
//! index-search resolution strategy.
//!
//! ```bash
//! catalog-indexer --index-url http://localhost:9200
//! catalog-indexer --recreate
//! ```

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};

use food_footprint::catalog::{CatalogIndexer, ElasticsearchIndex};
use food_footprint::config::ConfigManager;
use food_footprint::engine::OlcaIpcClient;
use food_footprint::logging;

#[derive(Parser)]
#[command(name = "catalog-indexer")]
#[command(about = "Index catalog processes for product name search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Search index URL (overrides catalog.index_url)
    #[arg(long)]
    index_url: Option<String>,

    /// Index name (overrides catalog.index_name)
    #[arg(long)]
    index_name: Option<String>,

    /// Impact engine URL (overrides engine.base_url)
    #[arg(long)]
    engine_url: Option<String>,

    /// Delete the index before indexing
    #[arg(long)]
    recreate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();
    let cli = Cli::parse();

    let config_manager = ConfigManager::load().context("failed to load configuration")?;
    let config = config_manager.config();

    let index_url = cli
        .index_url
        .or_else(|| config.catalog.index_url.clone())
        .context("no search index URL configured (catalog.index_url or --index-url)")?;
    let index_name = cli
        .index_name
        .unwrap_or_else(|| config.catalog.index_name.clone());
    let engine_url = cli
        .engine_url
        .unwrap_or_else(|| config.engine.base_url.clone());

    let index = ElasticsearchIndex::new(&index_url, &index_name, config.catalog.timeout())?;
    if !index.ping().await {
        bail!("search index at {index_url} is not reachable");
    }

    if cli.recreate {
        warn!(index = %index_name, "Deleting existing index");
        index.delete_index().await?;
    }

    let catalog = OlcaIpcClient::new(&engine_url, config.engine.timeout())?;

    let stored = CatalogIndexer::sync(&catalog, &index)
        .await
        .context("catalog sync failed")?;

    info!(stored = stored, index = %index_name, "Catalog indexed");
    println!("Indexed {stored} processes into '{index_name}'");
    Ok(())
}

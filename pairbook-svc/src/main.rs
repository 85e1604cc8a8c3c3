//! pairbook-svc - HTTP service over the track pairing engine
//!
//! Accepts track lists and pairing plans, builds original/sample pairs, and
//! accumulates them into a persistent canonical store deduplicated by
//! normalized title/artist keys.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use pairbook_core::store::CanonicalStore;
use pairbook_svc::catalog::CatalogClient;
use pairbook_svc::config::{Cli, ServiceConfig};
use pairbook_svc::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting pairbook-svc v{}", env!("CARGO_PKG_VERSION"));

    let config = ServiceConfig::resolve(Cli::parse());
    info!("Canonical store: {}", config.store_path.display());

    let store = CanonicalStore::new(&config.store_path);
    // Fail fast on an unreadable or corrupt store rather than at first merge.
    let existing = store.load()?;
    info!("Loaded {} stored pair(s)", existing.len());

    let catalog = match &config.catalog_url {
        Some(url) => {
            info!("Catalog service: {}", url);
            Some(CatalogClient::new(url)?)
        }
        None => {
            info!("No catalog service configured; playlist endpoints disabled");
            None
        }
    };

    let state = AppState::new(store, catalog);
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("pairbook-svc listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

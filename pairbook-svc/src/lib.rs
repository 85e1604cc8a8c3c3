//! pairbook-svc library - HTTP surface over the pairing engine
//!
//! Thin glue only: handlers deserialize requests, call into
//! `pairbook-core`, and serialize responses. The canonical store sits behind
//! a mutex because the core requires external mutual exclusion for
//! concurrent merges against the same store file.

use std::sync::Arc;

use axum::Router;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use pairbook_core::store::CanonicalStore;

pub mod api;
pub mod catalog;
pub mod config;

use catalog::CatalogClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Canonical store, serialized behind a mutex (single-writer discipline)
    pub store: Arc<Mutex<CanonicalStore>>,
    /// Outbound catalog client; `None` when no catalog URL is configured
    pub catalog: Option<Arc<CatalogClient>>,
}

impl AppState {
    pub fn new(store: CanonicalStore, catalog: Option<CatalogClient>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            catalog: catalog.map(Arc::new),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/pairs", get(api::pairs::list_pairs))
        .route("/api/pairs/build", post(api::pairs::build_pairs))
        .route("/api/playlists/:id/build", post(api::pairs::build_from_playlist))
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

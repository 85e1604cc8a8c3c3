//! Catalog service client
//!
//! Fetches ordered track lists from the external music catalog. One plain
//! GET per playlist: the pairing flow is deterministic and local, so a
//! failed fetch is reported to the caller rather than retried.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use pairbook_core::Track;

const USER_AGENT: &str = concat!("pairbook/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("Catalog API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Track list payload returned by the catalog
#[derive(Debug, Deserialize)]
struct TrackListResponse {
    items: Vec<Track>,
}

/// HTTP client for the catalog service
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the ordered track list of one playlist.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, CatalogError> {
        let url = playlist_tracks_url(&self.base_url, playlist_id);
        debug!("fetching track list from {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(CatalogError::PlaylistNotFound(playlist_id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), body));
        }

        let payload: TrackListResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(payload.items)
    }
}

fn playlist_tracks_url(base_url: &str, playlist_id: &str) -> String {
    format!(
        "{}/playlists/{}/tracks",
        base_url.trim_end_matches('/'),
        playlist_id
    )
}

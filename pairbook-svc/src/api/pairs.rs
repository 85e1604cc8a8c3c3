//! Pair building and canonical store endpoints
//!
//! The request flow is the whole reason this service exists: coerce the
//! caller's plan, validate it, build pairs, merge them into the canonical
//! store, and report what collided. All of the actual logic lives in
//! `pairbook-core`; these handlers translate between HTTP and the engine.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use pairbook_core::merge::{classify_collisions, merge, Collision};
use pairbook_core::plan::{self, PairingPlan, RawPlan};
use pairbook_core::{build, Pair, Track};

use crate::AppState;

/// Request body for POST /api/pairs/build
#[derive(Debug, Deserialize)]
pub struct BuildRequest {
    pub tracks: Vec<Track>,
    /// Raw pairing plan; when absent, tracks pair sequentially (1,2), (3,4), ...
    #[serde(default)]
    pub plan: Option<RawPlan>,
}

/// Request body for POST /api/playlists/:id/build
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistBuildRequest {
    #[serde(default)]
    pub plan: Option<RawPlan>,
}

/// Response for both build endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResponse {
    /// Pairs built from this request, in presentation order
    pub pairs: Vec<Pair>,
    /// Positions the plan never consumed (warning, not failure)
    pub leftover: Vec<usize>,
    /// Which new pairs collided with the store or with this batch
    pub collisions: Vec<Collision>,
    /// Store size after the merge
    pub merged_total: usize,
}

/// Response for GET /api/pairs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairListResponse {
    pub pairs: Vec<Pair>,
    pub total: usize,
}

/// GET /api/pairs
///
/// Current canonical store contents, in first-observation order.
pub async fn list_pairs(State(state): State<AppState>) -> Result<Json<PairListResponse>, ApiError> {
    let store = state.store.lock().await;
    let pairs = store.load().map_err(|e| ApiError::Store(e.to_string()))?;
    let total = pairs.len();
    Ok(Json(PairListResponse { pairs, total }))
}

/// POST /api/pairs/build
///
/// Build pairs from the submitted tracks and plan, merge them into the
/// canonical store, and return the build plus collision diagnostics.
pub async fn build_pairs(
    State(state): State<AppState>,
    Json(req): Json<BuildRequest>,
) -> Result<Json<BuildResponse>, ApiError> {
    build_and_merge(&state, req.tracks, req.plan).await.map(Json)
}

/// POST /api/playlists/:id/build
///
/// Same flow as `/api/pairs/build`, but the track list is fetched from the
/// configured catalog service first.
pub async fn build_from_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
    Json(req): Json<PlaylistBuildRequest>,
) -> Result<Json<BuildResponse>, ApiError> {
    let catalog = state.catalog.as_ref().ok_or(ApiError::CatalogNotConfigured)?;
    let tracks = catalog
        .playlist_tracks(&playlist_id)
        .await
        .map_err(|e| ApiError::Catalog(e.to_string()))?;
    info!("fetched {} track(s) for playlist {}", tracks.len(), playlist_id);
    build_and_merge(&state, tracks, req.plan).await.map(Json)
}

async fn build_and_merge(
    state: &AppState,
    tracks: Vec<Track>,
    raw_plan: Option<RawPlan>,
) -> Result<BuildResponse, ApiError> {
    let track_count = tracks.len();

    let pairing_plan = match raw_plan {
        Some(raw) => {
            let normalized = plan::normalize(&raw, track_count);
            let report = plan::validate(&normalized, track_count);
            if !report.is_ok() {
                return Err(ApiError::InvalidPlan(report.messages()));
            }
            normalized
        }
        None => PairingPlan::sequential(track_count),
    };

    let outcome = build(&tracks, &pairing_plan).map_err(|e| ApiError::Build(e.to_string()))?;

    // Single-writer discipline: hold the store lock across load-merge-save.
    let store = state.store.lock().await;
    let stored = store.load().map_err(|e| ApiError::Store(e.to_string()))?;
    let collisions = classify_collisions(&stored, &outcome.pairs);
    let merged = merge(&stored, &outcome.pairs);
    store
        .save(&merged)
        .map_err(|e| ApiError::Store(e.to_string()))?;

    Ok(BuildResponse {
        pairs: outcome.pairs,
        leftover: outcome.leftover,
        collisions,
        merged_total: merged.len(),
    })
}

/// Pair endpoint errors
#[derive(Debug)]
pub enum ApiError {
    /// Plan failed validation; carries the full defect list
    InvalidPlan(Vec<String>),
    /// Build-time fatal error (range parity mismatch)
    Build(String),
    /// Canonical store could not be read or written
    Store(String),
    /// Catalog fetch failed
    Catalog(String),
    /// Playlist endpoint used without a configured catalog URL
    CatalogNotConfigured,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidPlan(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "invalid pairing plan", "details": errors }),
            ),
            ApiError::Build(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Build error: {}", msg) }),
            ),
            ApiError::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Store error: {}", msg) }),
            ),
            ApiError::Catalog(msg) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": format!("Catalog error: {}", msg) }),
            ),
            ApiError::CatalogNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "No catalog service configured" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

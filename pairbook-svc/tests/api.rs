//! End-to-end tests for the HTTP surface: build, merge, list, and the
//! error statuses for invalid plans and unbuildable geometries.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use pairbook_core::store::CanonicalStore;
use pairbook_svc::{build_router, AppState};

fn test_app(dir: &tempfile::TempDir) -> Router {
    let store = CanonicalStore::new(dir.path().join("pairs.json"));
    build_router(AppState::new(store, None))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn tracks(n: usize) -> Value {
    Value::Array(
        (1..=n)
            .map(|i| json!({"title": format!("Title {i}"), "artist": format!("Artist {i}")}))
            .collect(),
    )
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "pairbook-svc");
}

#[tokio::test]
async fn build_with_plan_then_list() {
    let dir = tempfile::tempdir().unwrap();

    let request = post_json(
        "/api/pairs/build",
        json!({
            "tracks": tracks(4),
            "plan": {"ranges": [{"start": 1, "end": 4, "mapping": "EVEN_ORIGINAL"}]}
        }),
    );
    let response = test_app(&dir).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["pairs"].as_array().unwrap().len(), 2);
    assert_eq!(body["pairs"][0]["originalPos"], 2);
    assert_eq!(body["pairs"][0]["sampledPos"], 1);
    assert_eq!(body["mergedTotal"], 2);
    assert_eq!(body["collisions"].as_array().unwrap().len(), 0);

    // The merge persisted: a fresh router over the same store sees it.
    let response = test_app(&dir)
        .oneshot(Request::get("/api/pairs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn rebuild_reports_store_collisions() {
    let dir = tempfile::tempdir().unwrap();
    let request_body = json!({
        "tracks": tracks(4),
        "plan": {"ranges": [{"start": 1, "end": 4, "mapping": "EVEN_ORIGINAL"}]}
    });

    let response = test_app(&dir)
        .oneshot(post_json("/api/pairs/build", request_body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = test_app(&dir)
        .oneshot(post_json("/api/pairs/build", request_body))
        .await
        .unwrap();
    let body = body_json(response).await;
    let collisions = body["collisions"].as_array().unwrap();
    assert_eq!(collisions.len(), 2);
    assert_eq!(collisions[0]["reason"], "already_in_store");
    // Duplicates do not grow the store.
    assert_eq!(body["mergedTotal"], 2);
}

#[tokio::test]
async fn missing_plan_pairs_sequentially() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(post_json("/api/pairs/build", json!({"tracks": tracks(4)})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["pairs"][0]["originalPos"], 1);
    assert_eq!(body["pairs"][0]["sampledPos"], 2);
    assert_eq!(body["pairs"][1]["originalPos"], 3);
}

#[tokio::test]
async fn missing_plan_odd_track_count_fails() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(post_json("/api/pairs/build", json!({"tracks": tracks(5)})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn invalid_plan_returns_full_defect_list() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(post_json(
            "/api/pairs/build",
            json!({
                "tracks": tracks(10),
                "plan": {"ranges": [
                    {"start": 1, "end": 5, "mapping": "EVEN_ORIGINAL"},
                    {"start": 5, "end": 8, "mapping": "ODD_ORIGINAL"}
                ]}
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    let details = body["details"].as_array().unwrap();
    // One overlap, position 5 doubly covered, positions 9-10 uncovered.
    assert!(details.iter().any(|d| d.as_str().unwrap().contains("overlaps")));
    assert!(details.iter().any(|d| d.as_str().unwrap().contains("position 9")));
    assert!(details.len() >= 4, "details: {details:?}");
}

#[tokio::test]
async fn parity_mismatch_aborts_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(post_json(
            "/api/pairs/build",
            json!({
                "tracks": tracks(10),
                "plan": {
                    "trios": [{"original": 5, "sampleA": 6, "sampleB": 7}],
                    "ranges": [
                        {"start": 1, "end": 4, "mapping": "EVEN_ORIGINAL"},
                        {"start": 8, "end": 10, "mapping": "ODD_ORIGINAL"}
                    ]
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("8-10"));

    // An aborted build leaves the store untouched.
    let response = test_app(&dir)
        .oneshot(Request::get("/api/pairs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn playlist_endpoint_requires_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(post_json("/api/playlists/abc/build", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

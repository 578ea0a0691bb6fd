mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use shortlink_web::api::handlers::{offline_handler, redirect_handler};
use shortlink_web::state::AppState;
use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    StubLinkApi, active_worker, asset_network, create_test_state, html_api, unreachable_api,
};

fn app(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{id}", get(redirect_handler))
        .fallback(offline_handler)
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let api = StubLinkApi::new().with_info(json!({
        "success": true,
        "longUrl": "https://example.com/target",
        "shortCode": "abc123"
    }));
    let server = app(create_test_state(Arc::new(api), None));

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn test_redirect_unsuccessful_link_is_not_found() {
    let api = StubLinkApi::new().with_info(json!({
        "success": false,
        "longUrl": "https://example.com/target"
    }));
    let server = app(create_test_state(Arc::new(api), None));

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 404);
    assert!(response.text().contains("Link not found"));
}

#[tokio::test]
async fn test_redirect_empty_long_url_is_not_found() {
    let api = StubLinkApi::new().with_info(json!({ "success": true, "longUrl": "" }));
    let server = app(create_test_state(Arc::new(api), None));

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_keeps_upstream_status() {
    let api = StubLinkApi::new().with_info_status(410);
    let server = app(create_test_state(Arc::new(api), None));

    let response = server.get("/gone").await;

    assert_eq!(response.status_code(), 410);
    assert!(response.text().contains("Failed to fetch link info"));
}

#[tokio::test]
async fn test_redirect_backend_unreachable() {
    let server = app(create_test_state(unreachable_api().await, None));

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 502);
    assert!(response.text().contains("Failed to fetch link info"));
}

#[tokio::test]
async fn test_asset_path_served_from_offline_cache() {
    let api = Arc::new(StubLinkApi::new());
    let network = Arc::new(asset_network());
    let worker = active_worker(network.clone()).await;
    network.go_offline();

    let server = app(create_test_state(api.clone(), Some(worker)));

    let response = server.get("/app.js").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "console.log('app')");
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_path_offline_is_synthetic_not_found() {
    let network = Arc::new(asset_network());
    let worker = active_worker(network.clone()).await;
    network.go_offline();

    let server = app(create_test_state(Arc::new(StubLinkApi::new()), Some(worker)));

    let response = server.get("/static/missing/page").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.text(), "Not found");
}

#[tokio::test]
async fn test_fallback_without_offline_cache() {
    let server = app(create_test_state(Arc::new(StubLinkApi::new()), None));

    let response = server.get("/nested/path").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.text(), "Not found");
}

#[tokio::test]
async fn test_non_get_passes_through_to_origin() {
    let network = Arc::new(asset_network());
    let worker = active_worker(network.clone()).await;
    let before = network.fetch_count();

    let server = app(create_test_state(Arc::new(StubLinkApi::new()), Some(worker)));

    let response = server.post("/forms/submit").text("payload").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.text(), "origin 404");
    assert_eq!(network.fetch_count(), before + 1);
}

#[tokio::test]
async fn test_session_page_not_served_to_other_clients_offline() {
    let network = Arc::new(asset_network().session_page("/account/home"));
    let worker = active_worker(network.clone()).await;

    let server = app(create_test_state(Arc::new(StubLinkApi::new()), Some(worker)));

    let response = server
        .get("/account/home")
        .add_header("Cookie", "session=alice")
        .await;
    response.assert_status_ok();
    assert_eq!(response.text(), "dashboard of session=alice");

    network.go_offline();

    let response = server.get("/account/home").await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.text(), "Not found");
}

#[tokio::test]
async fn test_anonymous_page_available_offline() {
    let network = Arc::new(asset_network().session_page("/account/home"));
    let worker = active_worker(network.clone()).await;

    let server = app(create_test_state(Arc::new(StubLinkApi::new()), Some(worker)));

    server.get("/account/home").await.assert_status_ok();
    network.go_offline();

    let response = server
        .get("/account/home")
        .add_header("Cookie", "session=bob")
        .await;
    response.assert_status_ok();
    assert_eq!(response.text(), "dashboard of anonymous");
}

#[tokio::test]
async fn test_client_accept_encoding_not_forwarded() {
    let network = Arc::new(asset_network().route("/pages/about", StatusCode::OK, "about"));
    let worker = active_worker(network.clone()).await;

    let server = app(create_test_state(Arc::new(StubLinkApi::new()), Some(worker)));

    let response = server
        .get("/pages/about")
        .add_header("Accept-Encoding", "br")
        .await;

    response.assert_status_ok();
    let forwarded = network.last_headers().unwrap();
    assert!(!forwarded.contains_key("accept-encoding"));
}

#[tokio::test]
async fn test_redirect_backend_invalid_body_is_bad_gateway() {
    let server = app(create_test_state(html_api().await, None));

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 502);
    assert!(response.text().contains("Failed to fetch link info"));
}

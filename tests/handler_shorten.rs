mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::{Value, json};
use shortlink_web::api::handlers::shorten_handler;
use shortlink_web::state::AppState;
use std::sync::Arc;

use common::{StubLinkApi, create_test_state, unreachable_api};

fn app(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_success_passes_backend_json_through() {
    let backend = json!({
        "success": true,
        "shortCode": "abc123",
        "longUrl": "https://example.com/page"
    });
    let api = Arc::new(StubLinkApi::new().with_shorten(backend.clone()));
    let server = app(create_test_state(api.clone(), None));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/page" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), backend);

    let payload = api.last_payload().unwrap();
    assert_eq!(payload["longUrl"], "https://example.com/page");
    assert!(!payload.contains_key("customAlias"));
}

#[tokio::test]
async fn test_shorten_bare_domain_is_prefixed() {
    let api = Arc::new(StubLinkApi::new().with_shorten(json!({ "success": true })));
    let server = app(create_test_state(api.clone(), None));

    server
        .post("/api/shorten")
        .json(&json!({
            "longUrl": "  example.com/page  ",
            "customAlias": "promo_2030",
            "expiresAt": "2030-01-01T00:00:00Z"
        }))
        .await
        .assert_status_ok();

    let payload = api.last_payload().unwrap();
    assert_eq!(payload["longUrl"], "https://example.com/page");
    assert_eq!(payload["customAlias"], "promo_2030");
    assert_eq!(payload["expiresAt"], "2030-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_shorten_invalid_url_returns_toast() {
    let api = Arc::new(StubLinkApi::new());
    let server = app(create_test_state(api.clone(), None));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "   " }))
        .await;

    assert_eq!(response.status_code(), 400);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Please enter a valid URL format");
    assert_eq!(
        json["error"]["details"]["toasts"],
        json!([{
            "kind": "error",
            "message": "Please enter a valid URL format",
            "position": "bottom-center"
        }])
    );
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_shorten_unparseable_url_is_rejected() {
    let api = Arc::new(StubLinkApi::new());
    let server = app(create_test_state(api.clone(), None));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "http://exa mple.com" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_shorten_rejects_bad_alias() {
    let api = Arc::new(StubLinkApi::new());
    let server = app(create_test_state(api.clone(), None));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "example.com", "customAlias": "a b" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Validation failed");
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_shorten_rejects_short_alias() {
    let server = app(create_test_state(Arc::new(StubLinkApi::new()), None));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "example.com", "customAlias": "ab" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_shorten_backend_status_is_kept() {
    let api = Arc::new(StubLinkApi::new().with_shorten_status(409));
    let server = app(create_test_state(api, None));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "example.com", "customAlias": "taken" }))
        .await;

    assert_eq!(response.status_code(), 409);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "upstream_error");
    assert_eq!(json["error"]["details"]["upstream_status"], 409);
}

#[tokio::test]
async fn test_shorten_backend_unreachable() {
    let server = app(create_test_state(unreachable_api().await, None));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "example.com" }))
        .await;

    assert_eq!(response.status_code(), 502);
}

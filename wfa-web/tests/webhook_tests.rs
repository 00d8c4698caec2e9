//! Integration tests for the change-notification webhook
//!
//! Drives the router through tower's `oneshot`, covering signature
//! verification, invalidation dispatch per document type, and delivery
//! idempotence.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use tower::util::ServiceExt; // for `oneshot`
use wfa_common::config::SiteConfig;
use wfa_web::{build_router, AppState};

fn setup_app(webhook_secret: Option<&str>) -> axum::Router {
    let mut config = SiteConfig::default();
    config.content_store.webhook_secret = webhook_secret.map(str::to_string);
    build_router(AppState::new(config).expect("state builds"))
}

fn webhook_request(uri: &str, body: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should parse JSON")
}

fn change(doc_type: &str, slug: &str) -> String {
    json!({ "_type": doc_type, "slug": { "current": slug } }).to_string()
}

fn sign(secret: &str, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

// =============================================================================
// Dispatch per document type (no secret configured)
// =============================================================================

#[tokio::test]
async fn test_post_change_invalidates_blog_paths() {
    let app = setup_app(None);
    let body = change("post", "automating-invoice-approval");
    let response = app
        .oneshot(webhook_request("/api/webhook", &body, &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["revalidated"], true);
    assert_eq!(
        body["paths"],
        json!(["/blog", "/blog/automating-invoice-approval"])
    );
    assert_eq!(body["tags"], json!(["post"]));
}

#[tokio::test]
async fn test_review_change_invalidates_home_and_guides() {
    let app = setup_app(None);
    let body = change("softwareReview", "flowbot");
    let response = app
        .oneshot(webhook_request("/api/webhook", &body, &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["paths"], json!(["/", "/reviews/flowbot"]));
    assert_eq!(body["tags"], json!(["review", "guide"]));
}

#[tokio::test]
async fn test_unknown_type_invalidates_home_only() {
    let app = setup_app(None);
    let body = json!({ "_type": "siteSettings" }).to_string();
    let response = app
        .oneshot(webhook_request("/api/webhook", &body, &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["paths"], json!(["/"]));
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn test_legacy_path_routes_to_same_handler() {
    let app = setup_app(None);
    let body = change("guide", "best-automation-tools");
    let response = app
        .oneshot(webhook_request("/api/webhook/sanity", &body, &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["paths"], json!(["/", "/guides/best-automation-tools"]));
}

#[tokio::test]
async fn test_duplicate_delivery_is_idempotent() {
    let app = setup_app(None);
    let body = change("post", "same-post");

    let first = app
        .clone()
        .oneshot(webhook_request("/api/webhook", &body, &[]))
        .await
        .unwrap();
    let second = app
        .oneshot(webhook_request("/api/webhook", &body, &[]))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        extract_json(first.into_body()).await,
        extract_json(second.into_body()).await
    );
}

#[tokio::test]
async fn test_invalid_payload_is_500() {
    let app = setup_app(None);
    let response = app
        .oneshot(webhook_request("/api/webhook", "not json", &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Signature verification (secret configured)
// =============================================================================

#[tokio::test]
async fn test_missing_signature_is_401() {
    let app = setup_app(Some("hook-secret"));
    let body = change("post", "x");
    let response = app
        .oneshot(webhook_request("/api/webhook", &body, &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_signature_is_401() {
    let app = setup_app(Some("hook-secret"));
    let body = change("post", "x");
    let signature = sign("other-secret", &body);
    let response = app
        .oneshot(webhook_request(
            "/api/webhook",
            &body,
            &[("sanity-webhook-signature", signature.as_str())],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_hmac_signature_is_accepted() {
    let app = setup_app(Some("hook-secret"));
    let body = change("post", "signed-post");
    let signature = sign("hook-secret", &body);
    let response = app
        .oneshot(webhook_request(
            "/api/webhook",
            &body,
            &[("sanity-webhook-signature", signature.as_str())],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["revalidated"], true);
}

#[tokio::test]
async fn test_shared_secret_header_is_accepted() {
    let app = setup_app(Some("hook-secret"));
    let body = change("category", "integrations");
    let response = app
        .oneshot(webhook_request(
            "/api/webhook",
            &body,
            &[("x-webhook-secret", "hook-secret")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_shared_secret_is_401() {
    let app = setup_app(Some("hook-secret"));
    let body = change("category", "integrations");
    let response = app
        .oneshot(webhook_request(
            "/api/webhook",
            &body,
            &[("x-webhook-secret", "guessed")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

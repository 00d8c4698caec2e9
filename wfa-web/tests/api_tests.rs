//! Integration tests for the wfa-web API surface
//!
//! Drives the real router through tower's `oneshot` with no upstream
//! services configured, exercising the validation matrices and the mock
//! membership/payment flows.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`
use wfa_common::config::SiteConfig;
use wfa_web::{build_router, AppState};

/// Test helper: app with default config (no upstream integrations)
fn setup_app() -> axum::Router {
    let state = AppState::new(SiteConfig::default()).expect("state builds");
    build_router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should parse JSON")
}

// =============================================================================
// Health endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app();
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "wfa-web");
    assert!(body["version"].is_string());
}

// =============================================================================
// Newsletter validation
// =============================================================================

#[tokio::test]
async fn test_newsletter_missing_email_is_400() {
    let app = setup_app();
    let response = app
        .oneshot(json_request("POST", "/api/newsletter", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Email is required");
}

#[tokio::test]
async fn test_newsletter_invalid_email_is_400() {
    let app = setup_app();
    for email in ["no-at-sign", "no@domain", "a b@example.com"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/newsletter",
                json!({ "email": email }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", email);
    }
}

#[tokio::test]
async fn test_newsletter_no_provider_is_500() {
    // Valid email, but neither ConvertKit nor Mailchimp configured: the
    // upstream failure path without any network call
    let app = setup_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/newsletter",
            json!({ "email": "jo@example.com", "firstName": "Jo" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Contact form validation
// =============================================================================

fn contact_body() -> Value {
    json!({
        "name": "Jo",
        "email": "jo@example.com",
        "subject": "Question",
        "message": "How do I export my workflows?",
    })
}

#[tokio::test]
async fn test_contact_valid_submission_is_200() {
    let app = setup_app();
    let response = app
        .oneshot(json_request("POST", "/api/contact", contact_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_contact_missing_any_required_field_is_400() {
    let app = setup_app();
    for field in ["name", "email", "subject", "message"] {
        let mut body = contact_body();
        body.as_object_mut().unwrap().remove(field);
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/contact", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", field);

        let body = extract_json(response.into_body()).await;
        assert!(body["error"].as_str().unwrap().contains(field));
    }
}

#[tokio::test]
async fn test_contact_invalid_email_is_400() {
    let app = setup_app();
    let mut body = contact_body();
    body["email"] = json!("not-an-email");
    let response = app
        .oneshot(json_request("POST", "/api/contact", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Mock membership CRUD
// =============================================================================

#[tokio::test]
async fn test_membership_team_plan_requires_team_size() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/membership",
            json!({ "email": "ops@example.com", "plan": "team", "teamSize": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/membership",
            json!({ "email": "ops@example.com", "plan": "team", "teamSize": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_membership_unknown_plan_is_400() {
    let app = setup_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/membership",
            json!({ "email": "jo@example.com", "plan": "platinum" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("free|pro|team"));
}

#[tokio::test]
async fn test_membership_create_lookup_delete_cycle() {
    let app = setup_app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/membership",
            json!({ "email": "jo@example.com", "plan": "pro" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let id = body["membership"]["id"].as_str().unwrap().to_string();

    // Lookup by email
    let response = app
        .clone()
        .oneshot(get_request("/api/membership?email=jo@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["membership"]["plan"], "pro");

    // Delete by id
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/membership?id={}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Lookup now misses
    let response = app
        .oneshot(get_request("/api/membership?email=jo@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_membership_delete_unknown_id_is_404() {
    let app = setup_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/membership?id=00000000-0000-0000-0000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Payment endpoints
// =============================================================================

#[tokio::test]
async fn test_checkout_session_requires_price_id() {
    let app = setup_app();
    let response = app
        .oneshot(get_request("/api/payment?mode=subscription"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_session_mock_shape() {
    let app = setup_app();
    let response = app
        .oneshot(get_request("/api/payment?priceId=price_123&mode=payment"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["id"].as_str().unwrap().starts_with("cs_mock_"));
    assert_eq!(body["priceId"], "price_123");
    assert_eq!(body["mode"], "payment");
    assert!(body["url"].as_str().unwrap().contains("/checkout/"));
}

#[tokio::test]
async fn test_payment_webhook_without_secret_is_400() {
    // Default config has no payment webhook secret
    let app = setup_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/payment",
            json!({ "type": "invoice.payment_succeeded", "data": { "object": {} } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payment_webhook_with_valid_signature() {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    let mut config = SiteConfig::default();
    config.stripe_webhook_secret = Some("whsec_test".to_string());
    let app = build_router(AppState::new(config).unwrap());

    let body = json!({
        "type": "checkout.session.completed",
        "data": { "object": { "id": "cs_test_1" } }
    })
    .to_string();

    let timestamp = "1700000000";
    let mut mac = Hmac::<Sha256>::new_from_slice(b"whsec_test").unwrap();
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body.as_bytes());
    let signature = format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()));

    let request = Request::builder()
        .method("POST")
        .uri("/api/payment")
        .header("content-type", "application/json")
        .header("stripe-signature", signature)
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["received"], true);
}

#[tokio::test]
async fn test_payment_webhook_bad_signature_is_400() {
    let mut config = SiteConfig::default();
    config.stripe_webhook_secret = Some("whsec_test".to_string());
    let app = build_router(AppState::new(config).unwrap());

    let request = Request::builder()
        .method("POST")
        .uri("/api/payment")
        .header("content-type", "application/json")
        .header("stripe-signature", "t=1700000000,v1=deadbeef")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// User review submission
// =============================================================================

fn review_body() -> Value {
    json!({
        "softwareSlug": "flowbot",
        "reviewerName": "Jo",
        "reviewerEmail": "jo@example.com",
        "rating": 4,
        "headline": "Solid automation tool",
        "pros": "Setup was fast and the workflow editor is genuinely easy to learn.",
        "cons": "The API rate limits are aggressive and support can be slow to reply.",
    })
}

#[tokio::test]
async fn test_review_submission_accepted_as_pending() {
    // No write token configured: submission lands in the moderation queue
    let app = setup_app();
    let response = app
        .oneshot(json_request("POST", "/api/reviews/submit", review_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "pending");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_review_rating_out_of_range_is_400() {
    let app = setup_app();
    for rating in [0, 6, -1] {
        let mut body = review_body();
        body["rating"] = json!(rating);
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/reviews/submit", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "rating={}", rating);
    }
}

#[tokio::test]
async fn test_review_pros_cons_length_bounds() {
    let app = setup_app();

    // Too short
    let mut body = review_body();
    body["pros"] = json!("Too short");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/reviews/submit", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Too long
    let mut body = review_body();
    body["cons"] = json!("x".repeat(501));
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/reviews/submit", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Boundary values pass
    let mut body = review_body();
    body["pros"] = json!("x".repeat(50));
    body["cons"] = json!("y".repeat(500));
    let response = app
        .oneshot(json_request("POST", "/api/reviews/submit", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Analytics ingestion
// =============================================================================

#[tokio::test]
async fn test_analytics_missing_event_is_400() {
    let app = setup_app();
    let response = app
        .oneshot(json_request("POST", "/api/analytics", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analytics_known_and_unknown_events_are_200() {
    let app = setup_app();
    for event in ["affiliate_click", "roi_calculated", "something_new"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/analytics",
                json!({ "event": event, "properties": { "page": "/reviews/flowbot" } }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = extract_json(response.into_body()).await;
        assert_eq!(body["tracked"], true);
    }
}

// =============================================================================
// ROI endpoint
// =============================================================================

#[tokio::test]
async fn test_roi_reference_values() {
    let app = setup_app();
    let response = app
        .oneshot(get_request("/api/roi?hours=10&rate=50&teamSize=5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["weekly"], 2500);
    assert_eq!(body["monthly"], 10000);
    assert_eq!(body["yearly"], 120000);
}

#[tokio::test]
async fn test_roi_missing_params_is_400() {
    let app = setup_app();
    let response = app
        .oneshot(get_request("/api/roi?hours=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

//! Payment endpoints
//!
//! GET /api/payment — mock checkout session (there is no live payment
//! provider; the pricing page needs a session-shaped response).
//! POST /api/payment — payment-provider webhook consumer: verifies the
//! `t=...,v1=...` signature header against the configured secret, then
//! dispatches on the event type. Dispatch arms only log; there is no
//! order/entitlement state to update in this service.

use crate::api::ApiError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::Sha256;
use tracing::{debug, info};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Deserialize)]
pub struct CheckoutQuery {
    #[serde(default, rename = "priceId")]
    pub price_id: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

/// GET /api/payment?priceId=&mode=
pub async fn checkout_session(
    State(state): State<AppState>,
    Query(query): Query<CheckoutQuery>,
) -> Result<Json<Value>, ApiError> {
    let price_id = query
        .price_id
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("priceId query parameter is required".to_string()))?;
    let mode = query.mode.as_deref().unwrap_or("subscription");

    let session_id = format!("cs_mock_{}", Uuid::new_v4().simple());
    let url = format!("{}/checkout/{}", state.config.site_url, session_id);

    info!(price_id, mode, "Mock checkout session created");

    Ok(Json(json!({
        "id": session_id,
        "url": url,
        "priceId": price_id,
        "mode": mode,
    })))
}

/// Payment webhook event envelope
#[derive(Debug, Deserialize)]
struct PaymentEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: EventData,
}

#[derive(Debug, Default, Deserialize)]
struct EventData {
    #[serde(default)]
    object: Value,
}

/// Verify a `t=<unix>,v1=<hex>` signature header: HMAC-SHA256 over
/// "{t}.{body}" with the shared secret.
pub fn verify_event_signature(secret: &str, header: &str, body: &[u8]) -> bool {
    let mut timestamp = None;
    let mut signature = None;
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = Some(v),
            Some(("v1", v)) => signature = Some(v),
            _ => {}
        }
    }
    let (Some(timestamp), Some(signature)) = (timestamp, signature) else {
        return false;
    };
    let Ok(provided) = hex::decode(signature) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    mac.verify_slice(&provided).is_ok()
}

/// POST /api/payment
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let secret = state
        .config
        .stripe_webhook_secret
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Payment webhook secret not configured".to_string()))?;

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("Missing signature header".to_string()))?;

    if !verify_event_signature(secret, signature, &body) {
        return Err(ApiError::BadRequest("Invalid signature".to_string()));
    }

    let event: PaymentEvent = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid event payload: {}", e)))?;

    match event.event_type.as_str() {
        "checkout.session.completed" => {
            info!(
                session = event.data.object["id"].as_str().unwrap_or("?"),
                "Checkout session completed"
            );
        }
        "customer.subscription.created" | "customer.subscription.updated" => {
            info!(
                subscription = event.data.object["id"].as_str().unwrap_or("?"),
                status = event.data.object["status"].as_str().unwrap_or("?"),
                "Subscription change"
            );
        }
        "customer.subscription.deleted" => {
            info!(
                subscription = event.data.object["id"].as_str().unwrap_or("?"),
                "Subscription cancelled"
            );
        }
        "invoice.payment_succeeded" => {
            info!(
                invoice = event.data.object["id"].as_str().unwrap_or("?"),
                "Invoice paid"
            );
        }
        "invoice.payment_failed" => {
            info!(
                invoice = event.data.object["id"].as_str().unwrap_or("?"),
                "Invoice payment failed"
            );
        }
        other => {
            debug!(event_type = other, "Unhandled payment event");
        }
    }

    Ok(Json(json!({ "received": true })))
}

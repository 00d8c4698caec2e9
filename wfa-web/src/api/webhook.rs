//! Content store change-notification webhook
//!
//! POST /api/webhook (also mounted at /api/webhook/sanity for the legacy
//! path) — verifies the notification when a webhook secret is configured,
//! maps the changed document type/slug to an invalidation set, and marks
//! the affected cached pages stale. Duplicate deliveries are harmless
//! because invalidation is a no-op-safe mark-stale.
//!
//! Verification accepts either form the store can send:
//! - an HMAC-SHA256 hex signature over the raw body, or
//! - a shared-secret header compared for equality.
//! With no secret configured, verification is skipped with a warning —
//! a deliberate convenience for non-production environments.

use crate::api::ApiError;
use crate::revalidate::invalidation_for;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::Sha256;
use tracing::{info, warn};
use wfa_common::content::Slug;

type HmacSha256 = Hmac<Sha256>;

/// Signature header carrying the HMAC-SHA256 hex digest of the body
const SIGNATURE_HEADER: &str = "sanity-webhook-signature";
/// Alternative header carrying the shared secret verbatim
const SECRET_HEADER: &str = "x-webhook-secret";

/// Change notification payload
#[derive(Debug, Deserialize)]
pub struct ChangePayload {
    #[serde(rename = "_type")]
    pub doc_type: String,
    #[serde(default)]
    pub slug: Option<Slug>,
}

/// Verify the HMAC-SHA256 hex signature of the raw body
pub fn verify_body_signature(secret: &str, body: &[u8], hex_signature: &str) -> bool {
    let Ok(provided) = hex::decode(hex_signature) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    mac.verify_slice(&provided).is_ok()
}

fn verify(headers: &HeaderMap, secret: &str, body: &[u8]) -> bool {
    if let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) {
        if verify_body_signature(secret, body, signature) {
            return true;
        }
    }
    if let Some(provided) = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok()) {
        if provided == secret {
            return true;
        }
    }
    false
}

/// POST /api/webhook
pub async fn revalidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    match state.config.content_store.webhook_secret.as_deref() {
        Some(secret) => {
            if !verify(&headers, secret, &body) {
                return Err(ApiError::Unauthorized(
                    "Webhook signature verification failed".to_string(),
                ));
            }
        }
        None => {
            warn!("Webhook secret not configured; skipping signature verification");
        }
    }

    let payload: ChangePayload = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Internal(format!("Invalid webhook payload: {}", e)))?;

    let slug = payload.slug.as_ref().map(|s| s.current.as_str());
    let set = invalidation_for(&payload.doc_type, slug);
    state.cache.apply(&set).await;

    info!(
        doc_type = %payload.doc_type,
        slug = slug.unwrap_or(""),
        paths = set.paths.len(),
        tags = set.tags.len(),
        "Revalidation applied"
    );

    Ok(Json(json!({
        "revalidated": true,
        "paths": set.paths,
        "tags": set.tags,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_signature_roundtrip() {
        let body = br#"{"_type":"post","slug":{"current":"x"}}"#;
        let mut mac = HmacSha256::new_from_slice(b"secret").unwrap();
        mac.update(body);
        let signature = hex::encode(mac.finalize().into_bytes());
        assert!(verify_body_signature("secret", body, &signature));
        assert!(!verify_body_signature("other", body, &signature));
    }

    #[test]
    fn test_non_hex_signature_rejected() {
        assert!(!verify_body_signature("secret", b"{}", "not hex at all"));
    }
}

//! Newsletter signup endpoint
//!
//! POST /api/newsletter — validates the address, then forwards to the
//! first configured provider (ConvertKit, then Mailchimp). Best-effort:
//! upstream failure is logged and surfaced as a generic 500, nothing is
//! retried or queued.

use crate::api::{is_valid_email, ApiError};
use crate::clients::SubscribeOutcome;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,
}

/// POST /api/newsletter
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<NewsletterRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Email is required".to_string()))?;

    if !is_valid_email(email) {
        // Reject before any upstream call
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }

    let first_name = request.first_name.as_deref().map(str::trim);

    // First configured provider wins
    let outcome = if let Some(convertkit) = &state.convertkit {
        convertkit
            .subscribe(email, first_name)
            .await
            .map_err(|e| ApiError::Upstream(format!("ConvertKit subscribe failed: {}", e)))?
    } else if let Some(mailchimp) = &state.mailchimp {
        mailchimp
            .add_member(email, first_name)
            .await
            .map_err(|e| ApiError::Upstream(format!("Mailchimp subscribe failed: {}", e)))?
    } else {
        return Err(ApiError::Upstream(
            "No newsletter provider configured".to_string(),
        ));
    };

    info!("Newsletter signup accepted");

    let message = match outcome {
        SubscribeOutcome::Subscribed => "Subscribed",
        SubscribeOutcome::AlreadySubscribed => "Already subscribed",
    };
    Ok(Json(json!({ "success": true, "message": message })))
}

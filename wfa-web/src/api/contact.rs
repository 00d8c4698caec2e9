//! Contact form endpoint
//!
//! POST /api/contact — validates required fields, logs the inquiry, and
//! tags the contact in ConvertKit when configured. Tagging is best-effort:
//! a failure is logged, never surfaced to the caller.

use crate::api::{is_valid_email, ApiError};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing required field: {}", field)))
}

/// POST /api/contact
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = required(&request.name, "name")?;
    let email = required(&request.email, "email")?;
    let subject = required(&request.subject, "subject")?;
    let message = required(&request.message, "message")?;

    if !is_valid_email(email) {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }

    info!(
        name,
        subject,
        company = request.company.as_deref().unwrap_or(""),
        phone = request.phone.as_deref().unwrap_or(""),
        message_chars = message.chars().count(),
        "Contact form submission"
    );

    if let Some(convertkit) = &state.convertkit {
        if let Err(e) = convertkit.tag_contact(email, "contact-form").await {
            warn!("ConvertKit contact tagging failed (ignored): {}", e);
        }
    }

    Ok(Json(json!({
        "success": true,
        "message": "Thanks for reaching out. We'll get back to you soon."
    })))
}

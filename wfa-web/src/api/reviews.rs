//! User review submission endpoint
//!
//! POST /api/reviews/submit — validates the submission and creates a
//! pending moderation document: in the content store when a write token is
//! configured, otherwise in the in-memory moderation queue. Approval
//! happens out-of-band; nothing here publishes a review.

use crate::api::{is_valid_email, ApiError};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use wfa_common::content::{ReviewStatus, UserReview};

/// Pros/cons length bounds, in characters
const TEXT_MIN_CHARS: usize = 50;
const TEXT_MAX_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub software_slug: Option<String>,
    #[serde(default)]
    pub reviewer_name: Option<String>,
    #[serde(default)]
    pub reviewer_email: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub pros: Option<String>,
    #[serde(default)]
    pub cons: Option<String>,
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing required field: {}", field)))
}

fn bounded_text<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    let text = required(value, field)?;
    let chars = text.chars().count();
    if !(TEXT_MIN_CHARS..=TEXT_MAX_CHARS).contains(&chars) {
        return Err(ApiError::BadRequest(format!(
            "{} must be between {} and {} characters",
            field, TEXT_MIN_CHARS, TEXT_MAX_CHARS
        )));
    }
    Ok(text)
}

/// POST /api/reviews/submit
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<Value>, ApiError> {
    let software_slug = required(&request.software_slug, "softwareSlug")?;
    let reviewer_name = required(&request.reviewer_name, "reviewerName")?;
    let reviewer_email = required(&request.reviewer_email, "reviewerEmail")?;
    let headline = required(&request.headline, "headline")?;
    let pros = bounded_text(&request.pros, "pros")?;
    let cons = bounded_text(&request.cons, "cons")?;

    if !is_valid_email(reviewer_email) {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }

    let rating = match request.rating {
        Some(r @ 1..=5) => r as u8,
        _ => {
            return Err(ApiError::BadRequest(
                "Rating must be between 1 and 5".to_string(),
            ))
        }
    };

    let review = UserReview {
        id: Uuid::new_v4(),
        software_slug: software_slug.to_string(),
        reviewer_name: reviewer_name.to_string(),
        reviewer_email: reviewer_email.to_string(),
        rating,
        headline: headline.to_string(),
        pros: pros.to_string(),
        cons: cons.to_string(),
        status: ReviewStatus::Pending,
        submitted_at: Utc::now(),
    };

    if state.config.content_store.api_token.is_some() {
        state
            .content
            .submit_user_review(&review)
            .await
            .map_err(|e| ApiError::Upstream(format!("Review submission failed: {}", e)))?;
    } else {
        // No write token: hold the submission in the local moderation queue
        let mut pending = state.pending_reviews.write().await;
        pending.push(review.clone());
    }

    info!(id = %review.id, software = software_slug, rating, "User review submitted");

    Ok(Json(json!({
        "success": true,
        "id": review.id,
        "status": "pending",
    })))
}

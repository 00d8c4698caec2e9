//! Analytics event ingestion
//!
//! POST /api/analytics — generic event sink. Dispatches on the event name
//! to tracking stubs (server-side analytics is not wired to a backend;
//! the stubs keep the client contract stable). Always 200 unless the
//! event name is missing.

use crate::api::ApiError;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct AnalyticsRequest {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub properties: Option<Value>,
}

fn track_affiliate_click(properties: &Value) {
    debug!(
        software = properties["software"].as_str().unwrap_or("?"),
        "Affiliate click"
    );
}

fn track_newsletter_view(properties: &Value) {
    debug!(page = properties["page"].as_str().unwrap_or("?"), "Newsletter form viewed");
}

fn track_roi_calculated(properties: &Value) {
    debug!(yearly = properties["yearly"].as_i64().unwrap_or(0), "ROI calculated");
}

fn track_page_view(properties: &Value) {
    debug!(path = properties["path"].as_str().unwrap_or("?"), "Page view");
}

/// POST /api/analytics
pub async fn ingest(Json(request): Json<AnalyticsRequest>) -> Result<Json<Value>, ApiError> {
    let event = request
        .event
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing event name".to_string()))?;

    let properties = request.properties.unwrap_or(Value::Null);

    match event {
        "affiliate_click" => track_affiliate_click(&properties),
        "newsletter_view" => track_newsletter_view(&properties),
        "roi_calculated" => track_roi_calculated(&properties),
        "page_view" => track_page_view(&properties),
        other => debug!(event = other, "Unhandled analytics event"),
    }

    Ok(Json(json!({ "tracked": true })))
}

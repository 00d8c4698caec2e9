//! Mock membership CRUD
//!
//! In-memory only — the membership product is not launched; these handlers
//! exist so the pricing page flows can be exercised end to end. Plan must
//! be one of free|pro|team, and the team plan requires a team size of at
//! least 2.

use crate::api::{is_valid_email, ApiError};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

/// Membership plan tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Team,
}

impl Plan {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(Plan::Free),
            "pro" => Some(Plan::Pro),
            "team" => Some(Plan::Team),
            _ => None,
        }
    }
}

/// A mock membership record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: Uuid,
    pub email: String,
    pub plan: Plan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default, rename = "teamSize")]
    pub team_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// POST /api/membership
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Email is required".to_string()))?;

    if !is_valid_email(email) {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }

    let plan_value = request
        .plan
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Plan is required".to_string()))?;
    let plan = Plan::parse(plan_value)
        .ok_or_else(|| ApiError::BadRequest("Plan must be one of free|pro|team".to_string()))?;

    if plan == Plan::Team && request.team_size.unwrap_or(0) < 2 {
        return Err(ApiError::BadRequest(
            "Team plan requires teamSize of at least 2".to_string(),
        ));
    }

    let membership = Membership {
        id: Uuid::new_v4(),
        email: email.to_string(),
        plan,
        team_size: request.team_size,
        created_at: Utc::now(),
    };

    info!(id = %membership.id, plan = ?plan, "Membership created (mock)");

    let mut memberships = state.memberships.write().await;
    memberships.insert(membership.id, membership.clone());

    Ok(Json(json!({ "success": true, "membership": membership })))
}

/// GET /api/membership?email=
pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Value>, ApiError> {
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Email query parameter is required".to_string()))?;

    let memberships = state.memberships.read().await;
    let found = memberships.values().find(|m| m.email == email);

    match found {
        Some(membership) => Ok(Json(json!({ "membership": membership }))),
        None => Err(ApiError::NotFound(format!(
            "No membership found for {}",
            email
        ))),
    }
}

/// DELETE /api/membership?id=
pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<RemoveQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = query
        .id
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Id query parameter is required".to_string()))?;
    let id: Uuid = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid membership id".to_string()))?;

    let mut memberships = state.memberships.write().await;
    match memberships.remove(&id) {
        Some(_) => {
            info!(%id, "Membership deleted (mock)");
            Ok(Json(json!({ "deleted": true })))
        }
        None => Err(ApiError::NotFound(format!("No membership with id {}", id))),
    }
}

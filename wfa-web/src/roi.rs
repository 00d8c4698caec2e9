//! ROI calculator
//!
//! Pure arithmetic behind the savings widget: weekly savings = hours ×
//! hourly rate × team size, projected to monthly (×4) and yearly (×12).
//! Inputs clamp to the widget's slider bounds. Exact integer math, no
//! rounding.

use crate::api::ApiError;
use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Slider bounds
const HOURS_RANGE: (u64, u64) = (1, 40);
const RATE_RANGE: (u64, u64) = (20, 200);
const TEAM_RANGE: (u64, u64) = (1, 50);

/// Calculator inputs, clamped to the slider bounds
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoiInputs {
    pub hours: u64,
    pub hourly_rate: u64,
    pub team_size: u64,
}

impl RoiInputs {
    pub fn clamped(hours: u64, hourly_rate: u64, team_size: u64) -> Self {
        Self {
            hours: hours.clamp(HOURS_RANGE.0, HOURS_RANGE.1),
            hourly_rate: hourly_rate.clamp(RATE_RANGE.0, RATE_RANGE.1),
            team_size: team_size.clamp(TEAM_RANGE.0, TEAM_RANGE.1),
        }
    }
}

/// Projected savings in dollars
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RoiEstimate {
    pub weekly: u64,
    pub monthly: u64,
    pub yearly: u64,
}

impl RoiEstimate {
    pub fn from_inputs(inputs: RoiInputs) -> Self {
        let weekly = inputs.hours * inputs.hourly_rate * inputs.team_size;
        let monthly = weekly * 4;
        let yearly = monthly * 12;
        Self {
            weekly,
            monthly,
            yearly,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoiQuery {
    pub hours: Option<u64>,
    pub rate: Option<u64>,
    #[serde(rename = "teamSize")]
    pub team_size: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RoiResponse {
    pub inputs: RoiInputs,
    #[serde(flatten)]
    pub estimate: RoiEstimate,
}

/// GET /api/roi?hours=&rate=&teamSize=
pub async fn calculate(Query(query): Query<RoiQuery>) -> Result<Json<RoiResponse>, ApiError> {
    let (Some(hours), Some(rate), Some(team_size)) = (query.hours, query.rate, query.team_size)
    else {
        return Err(ApiError::BadRequest(
            "hours, rate and teamSize query parameters are required".to_string(),
        ));
    };

    let inputs = RoiInputs::clamped(hours, rate, team_size);
    let estimate = RoiEstimate::from_inputs(inputs);
    Ok(Json(RoiResponse { inputs, estimate }))
}

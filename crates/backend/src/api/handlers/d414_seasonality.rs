use axum::extract::State;
use axum::{http::StatusCode, Json};
use contracts::dashboards::d414_seasonality::SeasonalityResponse;

use super::loaded_datasets;
use crate::dashboards::d414_seasonality::service;
use crate::shared::state::SharedState;

/// GET /api/d414/seasonality
pub async fn get_seasonality(State(state): State<SharedState>) -> Result<Json<SeasonalityResponse>, StatusCode> {
    let data = loaded_datasets(&state, "D414").await?;
    Ok(Json(service::get_seasonality(&data)))
}

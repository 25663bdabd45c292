use axum::extract::State;
use axum::{http::StatusCode, Json};
use contracts::dashboards::d411_pricing::PricingResponse;

use super::loaded_datasets;
use crate::dashboards::d411_pricing::service;
use crate::shared::state::SharedState;

/// GET /api/d411/pricing
pub async fn get_pricing(State(state): State<SharedState>) -> Result<Json<PricingResponse>, StatusCode> {
    let data = loaded_datasets(&state, "D411").await?;
    let response = service::get_pricing(&data);
    tracing::info!(
        "D411 Dashboard: {} categories, {} cost-rise alerts",
        response.category_ranking.len(),
        response.cost_rose.len()
    );
    Ok(Json(response))
}

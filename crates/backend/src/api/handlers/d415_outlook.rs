use axum::extract::{Query, State};
use axum::{http::StatusCode, Json};
use contracts::dashboards::common::DashboardRequest;
use contracts::dashboards::d415_outlook::OutlookResponse;

use super::loaded_datasets;
use crate::dashboards::d415_outlook::service;
use crate::shared::state::SharedState;

/// GET /api/d415/outlook?fixed_cost=16913.46
pub async fn get_outlook(
    State(state): State<SharedState>,
    Query(request): Query<DashboardRequest>,
) -> Result<Json<OutlookResponse>, StatusCode> {
    let data = loaded_datasets(&state, "D415").await?;
    let fixed_cost = state.effective_fixed_cost(request.fixed_cost).await;

    let response = service::get_outlook(&data, fixed_cost);
    tracing::info!(
        "D415 Dashboard: factor {:.3}, {} actions",
        response.adjustment_factor,
        response.actions.len()
    );
    Ok(Json(response))
}

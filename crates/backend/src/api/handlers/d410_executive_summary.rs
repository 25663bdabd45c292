use axum::extract::{Query, State};
use axum::{http::StatusCode, Json};
use contracts::dashboards::common::DashboardRequest;
use contracts::dashboards::d410_executive_summary::ExecutiveSummaryResponse;

use super::loaded_datasets;
use crate::dashboards::d410_executive_summary::service;
use crate::shared::state::SharedState;

/// GET /api/d410/executive_summary?fixed_cost=16913.46
pub async fn get_executive_summary(
    State(state): State<SharedState>,
    Query(request): Query<DashboardRequest>,
) -> Result<Json<ExecutiveSummaryResponse>, StatusCode> {
    let data = loaded_datasets(&state, "D410").await?;
    let fixed_cost = state.effective_fixed_cost(request.fixed_cost).await;

    let response = service::get_executive_summary(&data, fixed_cost, &state.registry);
    tracing::info!(
        "D410 Dashboard: {} revenue {:.2}, net {:.2}",
        response.reference_month.name,
        response.revenue,
        response.net_profit
    );
    Ok(Json(response))
}

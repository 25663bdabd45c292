use axum::extract::State;
use axum::{http::StatusCode, Json};
use contracts::dashboards::d413_revenue_diagnosis::RevenueDiagnosisResponse;

use super::loaded_datasets;
use crate::dashboards::d413_revenue_diagnosis::service;
use crate::shared::state::SharedState;

/// GET /api/d413/revenue_diagnosis
pub async fn get_revenue_diagnosis(
    State(state): State<SharedState>,
) -> Result<Json<RevenueDiagnosisResponse>, StatusCode> {
    let data = loaded_datasets(&state, "D413").await?;
    Ok(Json(service::get_revenue_diagnosis(&data)))
}

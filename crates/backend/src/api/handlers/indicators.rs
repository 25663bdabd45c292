use axum::extract::State;
use axum::{http::StatusCode, Json};
use contracts::shared::indicators::*;

use super::loaded_datasets;
use crate::shared::indicators::metadata;
use crate::shared::state::SharedState;

/// POST /api/indicators/compute
///
/// Batch-computes a set of indicators for the reference month.
pub async fn compute_indicators(
    State(state): State<SharedState>,
    Json(req): Json<ComputeIndicatorsRequest>,
) -> Result<Json<ComputeIndicatorsResponse>, StatusCode> {
    tracing::info!("Indicators: computing {} indicators", req.indicator_ids.len());

    let data = loaded_datasets(&state, "Indicators").await?;
    let fixed_cost = state.effective_fixed_cost(req.context.fixed_cost).await;
    let values = state.registry.compute(&req.indicator_ids, &data, fixed_cost);

    tracing::info!("Indicators: returning {} values", values.len());
    Ok(Json(ComputeIndicatorsResponse { values }))
}

/// GET /api/indicators/meta
///
/// Returns the full catalogue of available indicators and sets.
pub async fn get_indicator_catalog() -> Json<IndicatorCatalogResponse> {
    Json(metadata::build_catalog())
}

use axum::extract::State;
use axum::{http::StatusCode, Json};
use contracts::dashboards::d412_product_map::ProductMapResponse;

use super::loaded_datasets;
use crate::dashboards::d412_product_map::service;
use crate::shared::state::SharedState;

/// GET /api/d412/product_map
pub async fn get_product_map(State(state): State<SharedState>) -> Result<Json<ProductMapResponse>, StatusCode> {
    let data = loaded_datasets(&state, "D412").await?;
    let response = service::get_product_map(&data);
    tracing::info!("D412 Dashboard: {} products", response.total_products);
    Ok(Json(response))
}

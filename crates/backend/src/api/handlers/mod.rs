pub mod d410_executive_summary;
pub mod d411_pricing;
pub mod d412_product_map;
pub mod d413_revenue_diagnosis;
pub mod d414_seasonality;
pub mod d415_outlook;
pub mod data;
pub mod indicators;
pub mod settings;
pub mod u510_upload_staging;

use std::sync::Arc;

use axum::http::StatusCode;

use crate::shared::data::datasets::Datasets;
use crate::shared::state::AppState;

/// Current datasets, or 503 while nothing has been loaded.
pub(crate) async fn loaded_datasets(state: &AppState, page: &str) -> Result<Arc<Datasets>, StatusCode> {
    match state.datasets().await {
        Some(data) => Ok(data),
        None => {
            tracing::warn!("{}: datasets not loaded, answering 503", page);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

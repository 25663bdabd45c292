use axum::extract::State;
use axum::{http::StatusCode, Json};
use contracts::shared::indicators::{FixedCost, FixedCostSetting};

use crate::shared::state::SharedState;

/// GET /api/settings/fixed_cost
pub async fn get_fixed_cost(State(state): State<SharedState>) -> Json<FixedCostSetting> {
    Json(FixedCostSetting {
        fixed_cost: state.fixed_cost().await.value(),
    })
}

/// PUT /api/settings/fixed_cost
///
/// Values ≤ 0 are rejected and the current cost is kept.
pub async fn put_fixed_cost(
    State(state): State<SharedState>,
    Json(setting): Json<FixedCostSetting>,
) -> Result<Json<FixedCostSetting>, StatusCode> {
    let Some(cost) = FixedCost::new(setting.fixed_cost) else {
        tracing::warn!("Settings: rejected fixed cost {}", setting.fixed_cost);
        return Err(StatusCode::BAD_REQUEST);
    };
    state.set_fixed_cost(cost).await;
    Ok(Json(FixedCostSetting {
        fixed_cost: cost.value(),
    }))
}

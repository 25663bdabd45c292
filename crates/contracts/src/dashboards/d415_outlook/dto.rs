use serde::{Deserialize, Serialize};

use crate::dashboards::common::ReferenceMonth;
use crate::dashboards::d414_seasonality::SeasonBand;

/// Response for the outlook (scenarios & projections) dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlookResponse {
    pub reference_month: ReferenceMonth,
    pub fixed_cost: f64,
    /// Current-year actuals / reference-year revenue for the same months
    pub adjustment_factor: f64,
    /// January → December
    pub projections: Vec<MonthProjection>,
    /// Month after the reference month
    pub scenario_month: ReferenceMonth,
    pub scenarios: ScenarioSet,
    pub gauge: Gauge,
    /// Top 5 categories by revenue
    pub top_categories: Vec<CategoryOutlook>,
    pub actions: Vec<ActionItem>,
    pub watch_list: Vec<WatchItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionKind {
    Actual,
    Projected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthProjection {
    pub month_num: u32,
    pub label: String,
    pub revenue_2025: f64,
    pub revenue_2026: f64,
    pub projected: f64,
    pub kind: ProjectionKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub revenue: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSet {
    /// −15%
    pub pessimistic: Scenario,
    pub realistic: Scenario,
    /// +15%
    pub optimistic: Scenario,
}

/// Speedometer of the reference month revenue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gauge {
    pub current: f64,
    /// Break-even revenue
    pub minimum: f64,
    /// 1.5 × minimum
    pub ideal: f64,
    pub axis_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOutlook {
    pub category: String,
    pub revenue: f64,
    pub markdown_pct: f64,
    /// Seasonality index of the scenario month
    pub next_month_index: f64,
    pub band: SeasonBand,
}

/// What to do in the scenario month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ActionItem {
    RepriceCostRise { count: usize },
    SecureStarStock { products: Vec<String> },
    ReinforcePurchases { index: f64 },
    PlanPromotions { index: f64 },
    RevenueTarget { value: f64 },
    NetProfitTarget { value: f64 },
}

/// What to keep an eye on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WatchItem {
    CustomerFlow { change_pct: f64 },
    Margin { current_pct: f64, target_pct: f64 },
    Erosion { count: usize },
    DeadWeight { count: usize },
}

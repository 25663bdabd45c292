use serde::{Deserialize, Serialize};

/// Response for the seasonality & trends dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityResponse {
    pub reference_year_revenue: f64,
    pub reference_year_monthly_average: f64,
    pub reference_year_profit: f64,
    pub reference_year_margin_pct: f64,
    pub current_year_revenue: f64,
    pub current_year_months: usize,
    /// `None` when there is not enough data ("Dados insuficientes")
    pub next_month_projection: Option<NextMonthProjection>,
    /// One point per calendar month
    pub seasonality: Vec<SeasonalityPoint>,
    pub sku_mix: Option<SkuMixShift>,
    pub rolling_12: Vec<RollingPoint>,
    pub trend: Option<TrendSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextMonthProjection {
    pub month_num: u32,
    pub month_name: String,
    pub value: f64,
    /// next / reference month revenue in the reference year
    pub seasonal_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityPoint {
    pub month_num: u32,
    pub label: String,
    /// 1.00 = average month
    pub index: f64,
    pub band: SeasonBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonBand {
    /// > 1.10
    Hot,
    Neutral,
    /// < 0.90
    Cold,
}

impl SeasonBand {
    pub fn classify(index: f64) -> Self {
        if index > 1.10 {
            Self::Hot
        } else if index < 0.90 {
            Self::Cold
        } else {
            Self::Neutral
        }
    }
}

/// Change in active SKU count across the reference year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuMixShift {
    pub first: f64,
    pub last: f64,
    pub change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollingPoint {
    /// e.g., "Dez/25", "Jan/26"
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Growing,
    Shrinking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSummary {
    pub latest: f64,
    pub change_pct: f64,
    pub direction: TrendDirection,
}

use serde::{Deserialize, Serialize};

use crate::dashboards::common::{MarginBand, ReferenceMonth, YoyComparison};
use crate::shared::indicators::IndicatorValue;

/// Response for the executive summary dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSummaryResponse {
    pub reference_month: ReferenceMonth,
    pub fixed_cost: f64,
    pub revenue: f64,
    pub gross_profit: f64,
    /// Gross profit minus fixed cost
    pub net_profit: f64,
    pub gross_margin_pct: f64,
    pub net_margin_pct: f64,
    pub health: HealthBand,
    /// Revenue needed to cover the fixed cost at the current gross margin
    pub break_even: f64,
    /// How far revenue is above break-even, in percent
    pub break_even_headroom_pct: f64,
    pub coupons: f64,
    pub average_ticket: f64,
    pub active_skus: usize,
    pub curve_a_count: usize,
    /// `None` until at least one month of the current year is reported
    pub yoy: Option<YoyComparison>,
    pub monthly_evolution: Vec<MonthlyEvolutionPoint>,
    /// Sorted by revenue, descending
    pub categories: Vec<CategoryShare>,
    /// Top 10 by profit
    pub top_products: Vec<ProductProfit>,
    /// Share of total profit generated by `top_products`
    pub top_products_profit_share_pct: f64,
    /// KPI cards in display order
    pub cards: Vec<IndicatorValue>,
}

/// Net margin health against the 15% target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    /// > 20%
    Healthy,
    /// 15–20%
    Attention,
    Critical,
}

impl HealthBand {
    pub fn classify(net_margin_pct: f64) -> Self {
        if net_margin_pct > 20.0 {
            Self::Healthy
        } else if net_margin_pct > 15.0 {
            Self::Attention
        } else {
            Self::Critical
        }
    }
}

/// One month of the revenue/profit evolution chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyEvolutionPoint {
    pub month_num: u32,
    pub month_name: String,
    pub revenue_2025: Option<f64>,
    pub profit_2025: Option<f64>,
    pub revenue_2026: Option<f64>,
    pub profit_2026: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub revenue: f64,
    pub margin_pct: f64,
    pub band: MarginBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductProfit {
    pub name: String,
    pub revenue: f64,
    /// Revenue minus profit
    pub cost: f64,
    pub profit: f64,
}

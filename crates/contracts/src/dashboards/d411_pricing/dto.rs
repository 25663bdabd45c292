use serde::{Deserialize, Serialize};

use crate::dashboards::common::{MarginBand, ReferenceMonth};
use crate::projections::p915_erosion_alerts::ErosionAlert;

/// Response for the pricing intelligence dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingResponse {
    pub reference_month: ReferenceMonth,
    /// Revenue-weighted markdown across categories
    pub weighted_markdown_pct: f64,
    /// Curve-A products with margin below 35%
    pub low_margin_curve_a_count: usize,
    /// Estimated monthly gain from a 5% price adjustment on those products
    pub price_opportunity: f64,
    /// Sorted by markdown, descending
    pub category_ranking: Vec<CategoryMarkdown>,
    /// Sorted by erosion points, ascending
    pub cost_rose: Vec<ErosionAlert>,
    /// Sorted by erosion points, ascending
    pub cost_fell: Vec<ErosionAlert>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMarkdown {
    pub category: String,
    pub revenue: f64,
    pub markdown_pct: f64,
    pub band: MarginBand,
}

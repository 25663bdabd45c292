use serde::{Deserialize, Serialize};

use crate::dashboards::common::{ProductLine, ReferenceMonth};
use crate::projections::p912_products::ProductClass;

/// Response for the product profitability matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMapResponse {
    pub reference_month: ReferenceMonth,
    pub total_products: usize,
    /// One entry per matrix quadrant
    pub groups: Vec<ClassGroup>,
    /// How many products (best first) make up 80% of total profit
    pub profit_concentration_count: usize,
    /// All stars, by profit
    pub stars: Vec<ProductLine>,
    /// All cash generators, by revenue
    pub cash_generators: Vec<ProductLine>,
    /// Top 15 opportunities, by profit
    pub opportunities: Vec<ProductLine>,
    /// Top 15 dead weight, by revenue
    pub dead_weight: Vec<ProductLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassGroup {
    pub classification: ProductClass,
    pub label: String,
    pub count: usize,
    pub profit: f64,
}

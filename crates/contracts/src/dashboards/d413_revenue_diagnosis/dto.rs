use serde::{Deserialize, Serialize};

use crate::dashboards::common::ReferenceMonth;

/// Response for the revenue diagnosis dashboard:
/// revenue = coupons × average ticket, and which factor moved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueDiagnosisResponse {
    pub reference_month: ReferenceMonth,
    pub revenue: f64,
    pub coupons: f64,
    pub average_ticket: f64,
    /// `None` without a reported month to compare with
    pub coupons_change_pct: Option<f64>,
    pub ticket_change_pct: Option<f64>,
    /// `None` when the reference year has no revenue or coupons for the month
    pub impact: Option<ImpactSplit>,
    /// Top 12 categories by revenue
    pub categories: Vec<CategoryContribution>,
    pub heatmap: Vec<HeatmapCell>,
    /// Monday → Sunday, only weekdays present in the data
    pub weekdays: Vec<WeekdayAverage>,
    pub best_weekday: Option<String>,
    pub worst_weekday: Option<String>,
    /// Business days of the reference month in the current year, from the calendar
    pub business_days: u32,
    pub revenue_per_business_day: f64,
}

/// Revenue change attributed to customer flow vs ticket size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactSplit {
    /// (coupons − reference coupons) × reference ticket
    pub coupons_impact: f64,
    /// (ticket − reference ticket) × coupons
    pub ticket_impact: f64,
    pub driver: RevenueDriver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueDriver {
    CustomerFlow,
    Ticket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryContribution {
    pub category: String,
    pub revenue: f64,
    pub profitable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub week: u32,
    pub weekday: String,
    /// Rounded to whole reais
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdayAverage {
    /// Portuguese label ("Segunda" … "Domingo")
    pub weekday: String,
    pub days: u32,
    pub average_revenue: f64,
}

use serde::{Deserialize, Serialize};

/// Query accepted by every dashboard endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// Overrides the configured fixed cost for this request only
    #[serde(default)]
    pub fixed_cost: Option<f64>,
}

/// Month all pages are reporting on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceMonth {
    /// 1..=12
    pub num: u32,
    /// Portuguese month name (e.g., "Março")
    pub name: String,
}

/// Same month of the reference year compared with the current figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoyComparison {
    pub reference_revenue: f64,
    pub reference_profit: f64,
    pub reference_coupons: f64,
    pub reference_ticket: f64,
    pub revenue_change_pct: f64,
    pub profit_change_pct: f64,
    pub coupons_change_pct: f64,
    pub ticket_change_pct: f64,
}

/// Colour band of a margin percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginBand {
    /// > 55%
    High,
    /// 40–55%
    Medium,
    /// 30–40%
    Low,
    /// below the lowest threshold
    Critical,
}

impl MarginBand {
    pub fn classify(margin_pct: f64) -> Self {
        if margin_pct > 55.0 {
            Self::High
        } else if margin_pct > 40.0 {
            Self::Medium
        } else if margin_pct > 30.0 {
            Self::Low
        } else {
            Self::Critical
        }
    }

    /// Three-colour variant used by rankings: everything ≤ 40% is critical.
    pub fn traffic_light(margin_pct: f64) -> Self {
        if margin_pct > 55.0 {
            Self::High
        } else if margin_pct > 40.0 {
            Self::Medium
        } else {
            Self::Critical
        }
    }
}

/// Product row shown in ranking tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLine {
    pub name: String,
    pub days_sold: u32,
    pub margin_pct: f64,
    pub revenue: f64,
    pub profit: f64,
}

use contracts::dashboards::common::YoyComparison;
use contracts::projections::p910_monthly_sales::MonthlySales;
use contracts::projections::p914_yoy::YoyRow;
use contracts::shared::indicators::FixedCost;

use super::primitives::{pct_change, safe_divide, sum_by};

/// Store totals for the reference month, summed over categories.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthTotals {
    pub revenue: f64,
    pub gross_profit: f64,
    pub coupons: f64,
}

impl MonthTotals {
    pub fn from_sales(rows: &[MonthlySales]) -> Self {
        Self {
            revenue: sum_by(rows, |r| r.revenue),
            gross_profit: sum_by(rows, |r| r.gross_profit),
            coupons: sum_by(rows, |r| r.document_count),
        }
    }

    pub fn gross_margin_pct(&self) -> f64 {
        safe_divide(self.gross_profit, self.revenue, 0.0) * 100.0
    }

    pub fn average_ticket(&self) -> f64 {
        safe_divide(self.revenue, self.coupons, 0.0)
    }
}

/// Profit and break-even figures once the fixed cost is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitSummary {
    pub net_profit: f64,
    pub gross_margin_pct: f64,
    pub net_margin_pct: f64,
    pub break_even: f64,
    pub headroom_pct: f64,
}

pub fn summarize(totals: &MonthTotals, fixed_cost: FixedCost) -> ProfitSummary {
    let net_profit = totals.gross_profit - fixed_cost.value();
    let gross_margin_pct = totals.gross_margin_pct();
    let break_even = break_even(fixed_cost, gross_margin_pct);
    ProfitSummary {
        net_profit,
        gross_margin_pct,
        net_margin_pct: safe_divide(net_profit, totals.revenue, 0.0) * 100.0,
        break_even,
        headroom_pct: break_even_headroom_pct(totals.revenue, break_even),
    }
}

/// Revenue that covers the fixed cost at the given gross margin; 0 without margin.
pub fn break_even(fixed_cost: FixedCost, gross_margin_pct: f64) -> f64 {
    if gross_margin_pct > 0.0 {
        safe_divide(fixed_cost.value(), gross_margin_pct / 100.0, 0.0)
    } else {
        0.0
    }
}

pub fn break_even_headroom_pct(revenue: f64, break_even: f64) -> f64 {
    if break_even > 0.0 {
        (safe_divide(revenue, break_even, 0.0) - 1.0) * 100.0
    } else {
        0.0
    }
}

/// Net profit of a projected revenue, assuming the current gross margin holds.
pub fn projected_net_profit(revenue: f64, gross_margin_pct: f64, fixed_cost: FixedCost) -> f64 {
    revenue * (gross_margin_pct / 100.0) - fixed_cost.value()
}

/// Revenue-weighted average markdown, in percent.
pub fn weighted_markdown_pct(rows: &[MonthlySales]) -> f64 {
    let revenue = sum_by(rows, |r| r.revenue);
    let margin = sum_by(rows, |r| r.revenue * r.markdown_pct / 100.0);
    safe_divide(margin, revenue, 0.0) * 100.0
}

/// Compares current totals with the same month of the reference year.
///
/// Revenue and profit come from the YoY row itself; coupons and ticket
/// compare the monthly sales totals with the reference-year coupon count.
pub fn yoy_comparison(row: &YoyRow, totals: &MonthTotals) -> YoyComparison {
    let reference_ticket = safe_divide(row.revenue_2025, row.coupons_2025, 0.0);
    YoyComparison {
        reference_revenue: row.revenue_2025,
        reference_profit: row.profit_2025,
        reference_coupons: row.coupons_2025,
        reference_ticket,
        revenue_change_pct: pct_change(row.revenue_2026, row.revenue_2025),
        profit_change_pct: pct_change(row.profit_2026, row.profit_2025),
        coupons_change_pct: pct_change(totals.coupons, row.coupons_2025),
        ticket_change_pct: pct_change(totals.average_ticket(), reference_ticket),
    }
}

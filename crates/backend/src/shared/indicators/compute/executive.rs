use contracts::shared::indicators::*;

use super::primitives::{pct_change, reference_row, safe_divide, YOY_TOLERANCE_PCT};
use super::products::curve_a_count;
use super::profitability::{summarize, MonthTotals, ProfitSummary};
use crate::shared::data::datasets::Datasets;
use crate::shared::format::{format_int, format_money, format_number, format_signed_pct};
use crate::shared::indicators::metadata::ids;

// ---------------------------------------------------------------------------
// Shared reference-month figures
// ---------------------------------------------------------------------------

struct Snapshot {
    totals: MonthTotals,
    summary: ProfitSummary,
    /// Same month of the reference year: revenue, profit, coupons
    previous: Option<(f64, f64, f64)>,
}

fn snapshot(data: &Datasets, fixed_cost: FixedCost) -> Snapshot {
    let totals = MonthTotals::from_sales(&data.monthly_sales);
    let summary = summarize(&totals, fixed_cost);
    let previous = reference_row(&data.yoy).map(|r| (r.revenue_2025, r.profit_2025, r.coupons_2025));
    Snapshot {
        totals,
        summary,
        previous,
    }
}

fn compared(id: IndicatorId, value: f64, previous: Option<f64>) -> IndicatorValue {
    let change = previous.map(|p| pct_change(value, p));
    IndicatorValue {
        id,
        value: Some(value),
        previous_value: previous,
        change_percent: change,
        status: change
            .map(|c| IndicatorStatus::from_delta(c, YOY_TOLERANCE_PCT))
            .unwrap_or(IndicatorStatus::Neutral),
        subtitle: change.map(|c| format!("{} vs ano anterior", format_signed_pct(c))),
    }
}

fn plain(id: IndicatorId, value: f64, status: IndicatorStatus, subtitle: String) -> IndicatorValue {
    IndicatorValue {
        id,
        value: Some(value),
        previous_value: None,
        change_percent: None,
        status,
        subtitle: Some(subtitle),
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

pub fn compute_revenue(data: &Datasets, fixed_cost: FixedCost) -> IndicatorValue {
    let s = snapshot(data, fixed_cost);
    // YoY on revenue uses the YoY row so it matches the evolution chart
    match reference_row(&data.yoy) {
        Some(row) => compared(ids::revenue(), s.totals.revenue, Some(row.revenue_2025)).with_change(
            pct_change(row.revenue_2026, row.revenue_2025),
        ),
        None => compared(ids::revenue(), s.totals.revenue, None),
    }
}

pub fn compute_net_profit(data: &Datasets, fixed_cost: FixedCost) -> IndicatorValue {
    let s = snapshot(data, fixed_cost);
    let status = if s.summary.net_profit >= 0.0 {
        IndicatorStatus::Good
    } else {
        IndicatorStatus::Bad
    };
    plain(
        ids::net_profit(),
        s.summary.net_profit,
        status,
        format!("Lucro bruto {} - fixo {}", format_money(s.totals.gross_profit), format_money(fixed_cost.value())),
    )
}

pub fn compute_net_margin(data: &Datasets, fixed_cost: FixedCost) -> IndicatorValue {
    let s = snapshot(data, fixed_cost);
    let margin = s.summary.net_margin_pct;
    let status = if margin > 20.0 {
        IndicatorStatus::Good
    } else if margin > 15.0 {
        IndicatorStatus::Warning
    } else {
        IndicatorStatus::Bad
    };
    plain(
        ids::net_margin(),
        margin,
        status,
        format!("Margem bruta {:.1}%", s.summary.gross_margin_pct).replace('.', ","),
    )
}

pub fn compute_break_even(data: &Datasets, fixed_cost: FixedCost) -> IndicatorValue {
    let s = snapshot(data, fixed_cost);
    let headroom = s.summary.headroom_pct;
    let status = if headroom >= 0.0 {
        IndicatorStatus::Good
    } else {
        IndicatorStatus::Bad
    };
    plain(
        ids::break_even(),
        s.summary.break_even,
        status,
        format!("{} acima do equilíbrio", format_signed_pct(headroom)),
    )
}

pub fn compute_coupons(data: &Datasets, fixed_cost: FixedCost) -> IndicatorValue {
    let s = snapshot(data, fixed_cost);
    compared(ids::coupons(), s.totals.coupons, s.previous.map(|(_, _, c)| c))
}

pub fn compute_average_ticket(data: &Datasets, fixed_cost: FixedCost) -> IndicatorValue {
    let s = snapshot(data, fixed_cost);
    let previous = s.previous.map(|(r, _, c)| safe_divide(r, c, 0.0));
    compared(ids::average_ticket(), s.totals.average_ticket(), previous)
}

pub fn compute_active_skus(data: &Datasets, _fixed_cost: FixedCost) -> IndicatorValue {
    let curve_a = curve_a_count(&data.products);
    plain(
        ids::active_skus(),
        data.products.len() as f64,
        IndicatorStatus::Neutral,
        format!("{} produtos curva A", format_number(curve_a)),
    )
}

pub fn compute_gross_profit(data: &Datasets, fixed_cost: FixedCost) -> IndicatorValue {
    let s = snapshot(data, fixed_cost);
    match reference_row(&data.yoy) {
        Some(row) => compared(ids::gross_profit(), s.totals.gross_profit, Some(row.profit_2025))
            .with_change(pct_change(row.profit_2026, row.profit_2025)),
        None => plain(
            ids::gross_profit(),
            s.totals.gross_profit,
            IndicatorStatus::Neutral,
            format!("{} cupons", format_int(s.totals.coupons)),
        ),
    }
}

trait WithChange {
    fn with_change(self, change: f64) -> Self;
}

impl WithChange for IndicatorValue {
    /// Replaces the derived change with one computed from other columns.
    fn with_change(mut self, change: f64) -> Self {
        self.change_percent = Some(change);
        self.status = IndicatorStatus::from_delta(change, YOY_TOLERANCE_PCT);
        self.subtitle = Some(format!("{} vs ano anterior", format_signed_pct(change)));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::indicators::compute::primitives::test_rows::yoy;
    use contracts::projections::p910_monthly_sales::MonthlySales;

    fn data() -> Datasets {
        let mut march = yoy(3, 4500.0, 5000.0);
        march.coupons_2025 = 450.0;
        march.profit_2025 = 1000.0;
        march.profit_2026 = 1500.0;
        Datasets {
            monthly_sales: vec![MonthlySales {
                category: "Mercearia".into(),
                revenue: 5000.0,
                gross_profit: 1500.0,
                markdown_pct: 30.0,
                document_count: 500.0,
            }],
            yoy: vec![yoy(1, 4000.0, 4100.0), march],
            ..Default::default()
        }
    }

    #[test]
    fn test_revenue_card_compares_with_reference_year() {
        let card = compute_revenue(&data(), FixedCost::default());
        assert_eq!(card.value, Some(5000.0));
        assert_eq!(card.previous_value, Some(4500.0));
        assert!((card.change_percent.unwrap() - 11.11).abs() < 0.01);
        assert_eq!(card.status, IndicatorStatus::Good);
        assert_eq!(card.subtitle.as_deref(), Some("+11,1% vs ano anterior"));
    }

    #[test]
    fn test_net_profit_card_uses_fixed_cost() {
        let cost = FixedCost::new(1000.0).unwrap();
        let card = compute_net_profit(&data(), cost);
        assert_eq!(card.value, Some(500.0));
        assert_eq!(card.status, IndicatorStatus::Good);

        let margin = compute_net_margin(&data(), cost);
        assert!((margin.value.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(margin.status, IndicatorStatus::Bad);
    }

    #[test]
    fn test_ticket_card_without_reference_row() {
        let mut d = data();
        d.yoy.clear();
        let card = compute_average_ticket(&d, FixedCost::default());
        assert_eq!(card.value, Some(10.0));
        assert_eq!(card.change_percent, None);
        assert_eq!(card.status, IndicatorStatus::Neutral);
    }

    #[test]
    fn test_profit_card_uses_yoy_columns() {
        let card = compute_gross_profit(&data(), FixedCost::default());
        assert_eq!(card.value, Some(1500.0));
        assert!((card.change_percent.unwrap() - 50.0).abs() < 1e-9);
    }
}

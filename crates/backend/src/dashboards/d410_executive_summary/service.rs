use contracts::dashboards::common::MarginBand;
use contracts::dashboards::d410_executive_summary::{
    CategoryShare, ExecutiveSummaryResponse, HealthBand, MonthlyEvolutionPoint, ProductProfit,
};
use contracts::projections::p914_yoy::YoyRow;
use contracts::shared::indicators::{FixedCost, IndicatorId};

use crate::shared::data::datasets::Datasets;
use crate::shared::indicators::compute::primitives::{
    month_name, reference_month, reference_row, safe_divide, sum_by,
};
use crate::shared::indicators::compute::products::{by_profit_desc, curve_a_count};
use crate::shared::indicators::compute::profitability::{summarize, yoy_comparison, MonthTotals};
use crate::shared::indicators::metadata::{build_catalog, EXECUTIVE_SUMMARY_SET};
use crate::shared::indicators::registry::IndicatorRegistry;

const TOP_PRODUCTS: usize = 10;

/// Headline figures of the reference month
pub fn get_executive_summary(
    data: &Datasets,
    fixed_cost: FixedCost,
    registry: &IndicatorRegistry,
) -> ExecutiveSummaryResponse {
    let totals = MonthTotals::from_sales(&data.monthly_sales);
    let summary = summarize(&totals, fixed_cost);

    let (top_products, top_products_profit_share_pct) = top_products(data);

    ExecutiveSummaryResponse {
        reference_month: reference_month(&data.yoy),
        fixed_cost: fixed_cost.value(),
        revenue: totals.revenue,
        gross_profit: totals.gross_profit,
        net_profit: summary.net_profit,
        gross_margin_pct: summary.gross_margin_pct,
        net_margin_pct: summary.net_margin_pct,
        health: HealthBand::classify(summary.net_margin_pct),
        break_even: summary.break_even,
        break_even_headroom_pct: summary.headroom_pct,
        coupons: totals.coupons,
        average_ticket: totals.average_ticket(),
        active_skus: data.products.len(),
        curve_a_count: curve_a_count(&data.products),
        yoy: reference_row(&data.yoy).map(|row| yoy_comparison(row, &totals)),
        monthly_evolution: monthly_evolution(&data.yoy),
        categories: category_shares(data),
        top_products,
        top_products_profit_share_pct,
        cards: registry.compute(&executive_card_ids(), data, fixed_cost),
    }
}

fn executive_card_ids() -> Vec<IndicatorId> {
    build_catalog()
        .sets
        .into_iter()
        .find(|s| s.id.0 == EXECUTIVE_SUMMARY_SET)
        .map(|s| s.indicators)
        .unwrap_or_default()
}

/// Each year is plotted only for months where it has revenue.
fn monthly_evolution(yoy: &[YoyRow]) -> Vec<MonthlyEvolutionPoint> {
    let mut rows: Vec<&YoyRow> = yoy.iter().collect();
    rows.sort_by_key(|r| r.month_num);

    rows.into_iter()
        .map(|r| {
            let has_2025 = r.revenue_2025 > 0.0;
            let has_2026 = r.revenue_2026 > 0.0;
            MonthlyEvolutionPoint {
                month_num: r.month_num,
                month_name: if r.month_name.is_empty() {
                    month_name(r.month_num).to_string()
                } else {
                    r.month_name.clone()
                },
                revenue_2025: has_2025.then_some(r.revenue_2025),
                profit_2025: has_2025.then_some(r.profit_2025),
                revenue_2026: has_2026.then_some(r.revenue_2026),
                profit_2026: has_2026.then_some(r.profit_2026),
            }
        })
        .collect()
}

fn category_shares(data: &Datasets) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = data
        .monthly_sales
        .iter()
        .map(|c| CategoryShare {
            category: c.category.clone(),
            revenue: c.revenue,
            margin_pct: c.markdown_pct,
            band: MarginBand::classify(c.markdown_pct),
        })
        .collect();
    shares.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    shares
}

/// Ten most profitable products and their share of the total product profit.
fn top_products(data: &Datasets) -> (Vec<ProductProfit>, f64) {
    let total_profit = sum_by(&data.products, |p| p.profit_total);
    let top: Vec<ProductProfit> = by_profit_desc(&data.products)
        .into_iter()
        .take(TOP_PRODUCTS)
        .map(|p| ProductProfit {
            name: p.name.clone(),
            revenue: p.revenue_total,
            cost: p.revenue_total - p.profit_total,
            profit: p.profit_total,
        })
        .collect();
    let top_profit: f64 = top.iter().map(|p| p.profit).sum();
    let share = safe_divide(top_profit, total_profit, 0.0) * 100.0;
    (top, share)
}

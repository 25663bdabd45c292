use contracts::dashboards::common::ReferenceMonth;
use contracts::dashboards::d414_seasonality::SeasonBand;
use contracts::dashboards::d415_outlook::{
    ActionItem, CategoryOutlook, Gauge, OutlookResponse, Scenario, ScenarioSet, WatchItem,
};
use contracts::projections::p912_products::ProductClass;
use contracts::shared::indicators::FixedCost;

use crate::shared::data::datasets::Datasets;
use crate::shared::indicators::compute::erosion::cost_rise_count;
use crate::shared::indicators::compute::primitives::{
    month_name, next_month, reference_month, reference_row, safe_divide, NET_MARGIN_TARGET_PCT,
};
use crate::shared::indicators::compute::products::{by_profit_desc, of_class};
use crate::shared::indicators::compute::profitability::{
    break_even, projected_net_profit, MonthTotals,
};
use crate::shared::indicators::compute::seasonality::{adjustment_factor, project_year, seasonality_index};

const PESSIMISTIC: f64 = 0.85;
const OPTIMISTIC: f64 = 1.15;
const IDEAL_OVER_MINIMUM: f64 = 1.5;
const TOP_CATEGORIES: usize = 5;
const STAR_PICKS: usize = 3;
const REINFORCE_ABOVE: f64 = 1.05;
const PROMOTE_BELOW: f64 = 0.95;
const DEAD_WEIGHT_WATCH: usize = 50;

/// Projections, scenarios and the action plan for the month after the reference month
pub fn get_outlook(data: &Datasets, fixed_cost: FixedCost) -> OutlookResponse {
    let month = reference_month(&data.yoy);
    let totals = MonthTotals::from_sales(&data.monthly_sales);
    let gross_margin = totals.gross_margin_pct();

    let factor = adjustment_factor(&data.yoy);
    let projections = project_year(&data.yoy, factor);

    let scenario_num = next_month(month.num);
    let scenario_value = projections
        .iter()
        .find(|p| p.month_num == scenario_num)
        .map(|p| p.projected)
        .unwrap_or(0.0);
    let scenario = |band: f64| {
        let revenue = scenario_value * band;
        Scenario {
            revenue,
            net_profit: projected_net_profit(revenue, gross_margin, fixed_cost),
        }
    };
    let scenarios = ScenarioSet {
        pessimistic: scenario(PESSIMISTIC),
        realistic: scenario(1.0),
        optimistic: scenario(OPTIMISTIC),
    };

    let minimum = break_even(fixed_cost, gross_margin);
    let ideal = minimum * IDEAL_OVER_MINIMUM;
    let gauge = Gauge {
        current: totals.revenue,
        minimum,
        ideal,
        axis_max: ideal * IDEAL_OVER_MINIMUM,
    };

    // Months without reference revenue are treated as neutral
    let next_index = seasonality_index(&data.yoy, scenario_num).unwrap_or(1.0);

    let actions = action_plan(data, next_index, &scenarios.realistic);
    let watch_list = watch_list(data, &totals, gross_margin);

    OutlookResponse {
        reference_month: month,
        fixed_cost: fixed_cost.value(),
        adjustment_factor: factor,
        projections,
        scenario_month: ReferenceMonth {
            num: scenario_num,
            name: month_name(scenario_num).to_string(),
        },
        scenarios,
        gauge,
        top_categories: top_categories(data, next_index),
        actions,
        watch_list,
    }
}

fn top_categories(data: &Datasets, next_index: f64) -> Vec<CategoryOutlook> {
    let mut rows: Vec<CategoryOutlook> = data
        .monthly_sales
        .iter()
        .map(|c| CategoryOutlook {
            category: c.category.clone(),
            revenue: c.revenue,
            markdown_pct: c.markdown_pct,
            next_month_index: next_index,
            band: SeasonBand::classify(next_index),
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows.truncate(TOP_CATEGORIES);
    rows
}

fn action_plan(data: &Datasets, next_index: f64, realistic: &Scenario) -> Vec<ActionItem> {
    let mut actions = Vec::new();

    let cost_rose = cost_rise_count(&data.erosion);
    if cost_rose > 0 {
        actions.push(ActionItem::RepriceCostRise { count: cost_rose });
    }

    let stars = of_class(&data.products, ProductClass::Star);
    if !stars.is_empty() {
        let products = by_profit_desc(stars)
            .into_iter()
            .take(STAR_PICKS)
            .map(|p| p.name.clone())
            .collect();
        actions.push(ActionItem::SecureStarStock { products });
    }

    if next_index > REINFORCE_ABOVE {
        actions.push(ActionItem::ReinforcePurchases { index: next_index });
    } else if next_index < PROMOTE_BELOW {
        actions.push(ActionItem::PlanPromotions { index: next_index });
    }

    actions.push(ActionItem::RevenueTarget {
        value: realistic.revenue,
    });
    actions.push(ActionItem::NetProfitTarget {
        value: realistic.net_profit,
    });
    actions
}

fn watch_list(data: &Datasets, totals: &MonthTotals, gross_margin: f64) -> Vec<WatchItem> {
    // Without a reported month the comparison base is a single coupon
    let reference_coupons = reference_row(&data.yoy).map(|r| r.coupons_2025).unwrap_or(1.0);
    let mut items = vec![
        WatchItem::CustomerFlow {
            change_pct: safe_divide(totals.coupons - reference_coupons, reference_coupons, 0.0) * 100.0,
        },
        WatchItem::Margin {
            current_pct: gross_margin,
            target_pct: NET_MARGIN_TARGET_PCT,
        },
        WatchItem::Erosion {
            count: cost_rise_count(&data.erosion),
        },
    ];

    let dead_weight = of_class(&data.products, ProductClass::DeadWeight).len();
    if dead_weight > DEAD_WEIGHT_WATCH {
        items.push(WatchItem::DeadWeight { count: dead_weight });
    }
    items
}

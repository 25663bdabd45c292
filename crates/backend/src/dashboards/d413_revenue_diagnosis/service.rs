use contracts::dashboards::d413_revenue_diagnosis::{
    CategoryContribution, ImpactSplit, RevenueDiagnosisResponse, RevenueDriver,
};
use contracts::projections::p913_calendar::CalendarDay;

use crate::shared::data::datasets::Datasets;
use crate::shared::indicators::compute::primitives::{
    pct_change, reference_month, reference_row, safe_divide, CURRENT_YEAR,
};
use crate::shared::indicators::compute::profitability::MonthTotals;
use crate::shared::indicators::compute::weekdays::{best_and_worst, heatmap, weekday_averages};

const TOP_CATEGORIES: usize = 12;

/// Decomposes the month's revenue into customer flow and ticket.
pub fn get_revenue_diagnosis(data: &Datasets) -> RevenueDiagnosisResponse {
    let totals = MonthTotals::from_sales(&data.monthly_sales);
    let revenue = totals.revenue;
    let coupons = totals.coupons;
    let ticket = totals.average_ticket();
    let month = reference_month(&data.yoy);

    let mut coupons_change_pct = None;
    let mut ticket_change_pct = None;
    let mut impact = None;

    if let Some(row) = reference_row(&data.yoy) {
        let c25 = row.coupons_2025;
        let r25 = row.revenue_2025;
        let t25 = safe_divide(r25, c25, 0.0);
        coupons_change_pct = Some(pct_change(coupons, c25));
        ticket_change_pct = Some(pct_change(ticket, t25));
        if r25 > 0.0 && c25 > 0.0 {
            impact = Some(impact_split(coupons, ticket, c25, t25));
        }
    }

    let weekdays = weekday_averages(&data.daily_sales);
    let (best_weekday, worst_weekday) = best_and_worst(&weekdays).unzip();
    let business_days = business_days(&data.calendar, month.num, CURRENT_YEAR);

    RevenueDiagnosisResponse {
        reference_month: month,
        revenue,
        coupons,
        average_ticket: ticket,
        coupons_change_pct,
        ticket_change_pct,
        impact,
        categories: top_categories(data),
        heatmap: heatmap(&data.daily_sales),
        weekdays,
        best_weekday,
        worst_weekday,
        business_days,
        revenue_per_business_day: safe_divide(revenue, f64::from(business_days), 0.0),
    }
}

/// Revenue change attributed to coupon count versus ticket size.
fn impact_split(coupons: f64, ticket: f64, reference_coupons: f64, reference_ticket: f64) -> ImpactSplit {
    let coupons_impact = (coupons - reference_coupons) * reference_ticket;
    let ticket_impact = (ticket - reference_ticket) * coupons;
    let driver = if coupons_impact.abs() > ticket_impact.abs() {
        RevenueDriver::CustomerFlow
    } else {
        RevenueDriver::Ticket
    };
    ImpactSplit {
        coupons_impact,
        ticket_impact,
        driver,
    }
}

fn top_categories(data: &Datasets) -> Vec<CategoryContribution> {
    let mut rows: Vec<CategoryContribution> = data
        .monthly_sales
        .iter()
        .map(|c| CategoryContribution {
            category: c.category.clone(),
            revenue: c.revenue,
            profitable: c.gross_profit > 0.0,
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows.truncate(TOP_CATEGORIES);
    rows
}

fn business_days(calendar: &[CalendarDay], month: u32, year: u32) -> u32 {
    calendar
        .iter()
        .filter(|d| d.month == month && d.year == year && d.is_business_day)
        .count() as u32
}

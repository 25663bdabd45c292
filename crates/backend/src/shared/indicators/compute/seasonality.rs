use contracts::dashboards::d414_seasonality::{
    NextMonthProjection, RollingPoint, SkuMixShift, TrendDirection, TrendSummary,
};
use contracts::dashboards::d415_outlook::{MonthProjection, ProjectionKind};
use contracts::projections::p914_yoy::YoyRow;

use super::primitives::{
    month_label, month_name, next_month, pct_change, safe_divide, sum_by, yoy_row,
    CURRENT_YEAR, REFERENCE_YEAR,
};

/// Average monthly revenue of the reference year.
pub fn monthly_average(yoy: &[YoyRow]) -> f64 {
    safe_divide(sum_by(yoy, |r| r.revenue_2025), 12.0, 0.0)
}

/// Seasonality index of a month: reference-year revenue over the monthly average.
/// `None` when the month has no reference revenue or the average is zero.
pub fn seasonality_index(yoy: &[YoyRow], month_num: u32) -> Option<f64> {
    let average = monthly_average(yoy);
    let row = yoy_row(yoy, month_num)?;
    (average > 0.0 && row.revenue_2025 > 0.0).then(|| row.revenue_2025 / average)
}

/// Rows sorted by month number, without touching the input.
fn calendar_order(yoy: &[YoyRow]) -> Vec<&YoyRow> {
    let mut rows: Vec<&YoyRow> = yoy.iter().collect();
    rows.sort_by_key(|r| r.month_num);
    rows
}

/// How the current year is running against the reference year:
/// Σ current-year actuals / Σ reference-year revenue of the same months.
/// 1.0 without actuals.
pub fn adjustment_factor(yoy: &[YoyRow]) -> f64 {
    let reported: Vec<&YoyRow> = yoy.iter().filter(|r| r.is_reported()).collect();
    let actual: f64 = reported.iter().map(|r| r.revenue_2026).sum();
    let reference: f64 = reported.iter().map(|r| r.revenue_2025).sum();
    if reported.is_empty() || reference <= 0.0 {
        1.0
    } else {
        actual / reference
    }
}

/// Projects all twelve months of the current year by scaling the reference
/// year with `factor`. Months already reported are marked as actuals.
pub fn project_year(yoy: &[YoyRow], factor: f64) -> Vec<MonthProjection> {
    (1..=12)
        .map(|m| {
            let (revenue_2025, revenue_2026) = yoy_row(yoy, m)
                .map(|r| (r.revenue_2025, r.revenue_2026))
                .unwrap_or((0.0, 0.0));
            MonthProjection {
                month_num: m,
                label: month_label(m).to_string(),
                revenue_2025,
                revenue_2026,
                projected: if revenue_2025 > 0.0 {
                    revenue_2025 * factor
                } else {
                    0.0
                },
                kind: if revenue_2026 > 0.0 {
                    ProjectionKind::Actual
                } else {
                    ProjectionKind::Projected
                },
            }
        })
        .collect()
}

/// Next month's revenue estimated from the reference month's actual and the
/// reference-year month-over-month ratio.
pub fn next_month_projection(yoy: &[YoyRow], reference_num: u32) -> Option<NextMonthProjection> {
    let next_num = next_month(reference_num);
    let current = yoy_row(yoy, reference_num)?;
    let next = yoy_row(yoy, next_num)?;
    if current.revenue_2025 <= 0.0 || next.revenue_2025 <= 0.0 || current.revenue_2026 <= 0.0 {
        return None;
    }
    let seasonal_factor = next.revenue_2025 / current.revenue_2025;
    Some(NextMonthProjection {
        month_num: next_num,
        month_name: month_name(next_num).to_string(),
        value: current.revenue_2026 * seasonal_factor,
        seasonal_factor,
    })
}

/// Active SKU count at the first and last month of the reference year that have one.
pub fn sku_mix_shift(yoy: &[YoyRow]) -> Option<SkuMixShift> {
    let rows: Vec<&YoyRow> = calendar_order(yoy)
        .into_iter()
        .filter(|r| r.skus_2025 > 0.0)
        .collect();
    let first = rows.first()?.skus_2025;
    let last = rows.last()?.skus_2025;
    Some(SkuMixShift {
        first,
        last,
        change: last - first,
    })
}

/// Trailing twelve-month revenue.
///
/// The series is the reference year in calendar order followed by the
/// current-year actuals; one point per window that is fully covered.
pub fn rolling_12(yoy: &[YoyRow]) -> Vec<RollingPoint> {
    let ordered = calendar_order(yoy);
    let mut series: Vec<f64> = ordered.iter().map(|r| r.revenue_2025).collect();
    series.extend(ordered.iter().filter(|r| r.is_reported()).map(|r| r.revenue_2026));

    let ref_suffix = REFERENCE_YEAR % 100;
    let cur_suffix = CURRENT_YEAR % 100;

    (11..series.len())
        .map(|i| {
            let value = series[i + 1 - 12..=i].iter().sum();
            let label = if i < 12 {
                format!("{}/{}", month_label(i as u32 + 1), ref_suffix)
            } else {
                format!("{}/{}", month_label((i - 12) as u32 + 1), cur_suffix)
            };
            RollingPoint { label, value }
        })
        .collect()
}

/// Direction of the rolling series from its first to its last point.
pub fn trend(rolling: &[RollingPoint]) -> Option<TrendSummary> {
    if rolling.len() < 2 {
        return None;
    }
    let first = rolling.first()?.value;
    let latest = rolling.last()?.value;
    let change_pct = pct_change(latest, first);
    Some(TrendSummary {
        latest,
        change_pct,
        direction: if change_pct > 0.0 {
            TrendDirection::Growing
        } else {
            TrendDirection::Shrinking
        },
    })
}

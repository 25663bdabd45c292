use contracts::dashboards::d414_seasonality::{SeasonBand, SeasonalityPoint, SeasonalityResponse};
use contracts::projections::p914_yoy::YoyRow;

use crate::shared::data::datasets::Datasets;
use crate::shared::indicators::compute::primitives::{
    month_label, reference_month, safe_divide, sum_by, yoy_row,
};
use crate::shared::indicators::compute::seasonality::{
    monthly_average, next_month_projection, rolling_12, sku_mix_shift, trend,
};

/// Reference-year profile, current-year accumulation and rolling trend
pub fn get_seasonality(data: &Datasets) -> SeasonalityResponse {
    let yoy = &data.yoy;

    let reference_year_revenue = sum_by(yoy, |r| r.revenue_2025);
    let reference_year_profit = sum_by(yoy, |r| r.profit_2025);
    let reported: Vec<&YoyRow> = yoy.iter().filter(|r| r.is_reported()).collect();
    let rolling = rolling_12(yoy);

    SeasonalityResponse {
        reference_year_revenue,
        reference_year_monthly_average: monthly_average(yoy),
        reference_year_profit,
        reference_year_margin_pct: safe_divide(reference_year_profit, reference_year_revenue, 0.0) * 100.0,
        current_year_revenue: reported.iter().map(|r| r.revenue_2026).sum(),
        current_year_months: reported.len(),
        next_month_projection: next_month_projection(yoy, reference_month(yoy).num),
        seasonality: seasonality_chart(yoy),
        sku_mix: sku_mix_shift(yoy),
        trend: trend(&rolling),
        rolling_12: rolling,
    }
}

/// Index of every month, 0 when the average is zero or the month is absent.
fn seasonality_chart(yoy: &[YoyRow]) -> Vec<SeasonalityPoint> {
    let average = monthly_average(yoy);
    (1..=12)
        .map(|m| {
            let revenue = yoy_row(yoy, m).map(|r| r.revenue_2025).unwrap_or(0.0);
            let index = safe_divide(revenue, average, 0.0);
            SeasonalityPoint {
                month_num: m,
                label: month_label(m).to_string(),
                index,
                band: SeasonBand::classify(index),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::indicators::compute::primitives::test_rows::year;

    #[test]
    fn test_reference_year_profile() {
        let mut rows = year([
            1000.0, 1200.0, 800.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0,
            1000.0,
        ]);
        rows[0].revenue_2026 = 1100.0;
        for r in rows.iter_mut() {
            r.profit_2025 = r.revenue_2025 * 0.3;
        }

        let r = get_seasonality(&Datasets {
            yoy: rows,
            ..Default::default()
        });
        assert_eq!(r.reference_year_revenue, 12_000.0);
        assert_eq!(r.reference_year_monthly_average, 1000.0);
        assert!((r.reference_year_margin_pct - 30.0).abs() < 1e-9);
        assert_eq!(r.current_year_revenue, 1100.0);
        assert_eq!(r.current_year_months, 1);

        let next = r.next_month_projection.unwrap();
        assert_eq!(next.month_num, 2);
        assert!((next.value - 1320.0).abs() < 1e-9);

        assert_eq!(r.seasonality[1].band, SeasonBand::Hot);
        assert_eq!(r.seasonality[2].band, SeasonBand::Cold);
        assert_eq!(r.seasonality[3].band, SeasonBand::Neutral);
        assert_eq!(r.rolling_12.len(), 2);
    }

    #[test]
    fn test_empty_yoy() {
        let r = get_seasonality(&Datasets::default());
        assert_eq!(r.seasonality.len(), 12);
        assert!(r.seasonality.iter().all(|p| p.index == 0.0));
        assert!(r.next_month_projection.is_none());
        assert!(r.trend.is_none());
    }
}

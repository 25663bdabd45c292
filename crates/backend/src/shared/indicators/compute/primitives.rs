use contracts::dashboards::common::ReferenceMonth;
use contracts::projections::p914_yoy::YoyRow;

/// Year the `*_2025` columns refer to
pub const REFERENCE_YEAR: u32 = 2025;
/// Year being reported (`*_2026` columns)
pub const CURRENT_YEAR: u32 = 2026;

/// Net margin the store aims for, in percent
pub const NET_MARGIN_TARGET_PCT: f64 = 15.0;

/// YoY deltas within ±2 points are shown as stable
pub const YOY_TOLERANCE_PCT: f64 = 2.0;

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// `numerator / denominator`, or `default` when the denominator is zero or not finite.
pub fn safe_divide(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        default
    } else {
        numerator / denominator
    }
}

/// Relative change in percent; 0 when the reference is zero.
pub fn pct_change(current: f64, reference: f64) -> f64 {
    safe_divide(current - reference, reference, 0.0) * 100.0
}

pub fn sum_by<T>(rows: &[T], field: impl Fn(&T) -> f64) -> f64 {
    rows.iter().map(field).sum()
}

/// Portuguese name of month `num` (1..=12); empty outside the range.
pub fn month_name(num: u32) -> &'static str {
    match num {
        1..=12 => MONTH_NAMES[(num - 1) as usize],
        _ => "",
    }
}

/// Three-letter label of month `num` (1..=12); empty outside the range.
pub fn month_label(num: u32) -> &'static str {
    match num {
        1..=12 => MONTH_LABELS[(num - 1) as usize],
        _ => "",
    }
}

/// Month after `num`, December wraps to January.
pub fn next_month(num: u32) -> u32 {
    if num < 12 {
        num + 1
    } else {
        1
    }
}

/// Latest reported month of the current year.
///
/// Rows are not assumed to be sorted: the highest `month_num` with
/// current-year revenue wins.
pub fn reference_row(yoy: &[YoyRow]) -> Option<&YoyRow> {
    yoy.iter()
        .filter(|r| r.is_reported())
        .max_by_key(|r| r.month_num)
}

/// Month every page reports on; January when nothing is reported yet.
pub fn reference_month(yoy: &[YoyRow]) -> ReferenceMonth {
    match reference_row(yoy) {
        Some(row) => ReferenceMonth {
            num: row.month_num,
            name: if row.month_name.is_empty() {
                month_name(row.month_num).to_string()
            } else {
                row.month_name.clone()
            },
        },
        None => ReferenceMonth {
            num: 1,
            name: MONTH_NAMES[0].to_string(),
        },
    }
}

pub fn yoy_row(yoy: &[YoyRow], month_num: u32) -> Option<&YoyRow> {
    yoy.iter().find(|r| r.month_num == month_num)
}


#[cfg(test)]
mod tests {
    use super::test_rows::yoy;
    use super::*;

    #[test]
    fn test_safe_divide() {
        assert_eq!(safe_divide(10.0, 0.0, -1.0), -1.0);
        assert_eq!(safe_divide(10.0, f64::NAN, 7.0), 7.0);
        assert_eq!(safe_divide(10.0, 4.0, 0.0), 2.5);
        assert_eq!(safe_divide(-3.0, 2.0, 0.0), -1.5);
    }

    #[test]
    fn test_pct_change() {
        assert!((pct_change(5000.0, 4500.0) - 11.111).abs() < 0.01);
        assert_eq!(pct_change(100.0, 0.0), 0.0);
        assert_eq!(pct_change(50.0, 100.0), -50.0);
    }

    #[test]
    fn test_reference_month_defaults_to_january() {
        let rows = vec![yoy(1, 100.0, 0.0), yoy(2, 100.0, 0.0)];
        assert_eq!(
            reference_month(&rows),
            ReferenceMonth {
                num: 1,
                name: "Janeiro".into()
            }
        );
        assert_eq!(reference_month(&[]).num, 1);
    }

    #[test]
    fn test_reference_month_ignores_row_order() {
        let rows = vec![
            yoy(3, 4500.0, 5000.0),
            yoy(1, 4000.0, 4200.0),
            yoy(4, 4800.0, 0.0),
            yoy(2, 4100.0, 4300.0),
        ];
        let month = reference_month(&rows);
        assert_eq!(month.num, 3);
        assert_eq!(month.name, "Março");
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(next_month(12), 1);
        assert_eq!(next_month(2), 3);
        assert_eq!(month_label(2), "Fev");
        assert_eq!(month_name(13), "");
    }
}

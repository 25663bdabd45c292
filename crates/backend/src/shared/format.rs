//! pt-BR number formatting for logs and KPI subtitles.

/// Thousands separated with dots.
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    group_thousands(&n.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Rounded integer with thousands separators: `-1234.6` → `"-1.235"`.
pub fn format_int(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&format!("{:.0}", rounded.abs())))
}

/// Two decimals, comma as decimal separator: `1234.5` → `"1.234,50"`.
pub fn format_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{},{frac_part}", group_thousands(int_part))
}

/// `"R$ 1.234,50"`
pub fn format_money(value: f64) -> String {
    format!("R$ {}", format_decimal(value))
}

/// Signed percentage with one decimal: `11.11` → `"+11,1%"`.
pub fn format_signed_pct(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{}%", format!("{value:.1}").replace('.', ","))
}

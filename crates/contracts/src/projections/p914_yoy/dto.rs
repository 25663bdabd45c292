use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::{f64_or_zero, string_or_empty, u32_or_zero};

/// Month-by-month comparison between the reference year and the current year
/// (`yoy.json`). One row per calendar month of the reference year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoyRow {
    #[serde(rename = "Mes", default, deserialize_with = "string_or_empty")]
    pub month_name: String,
    #[serde(rename = "Mes_Num", default, deserialize_with = "u32_or_zero")]
    pub month_num: u32,
    #[serde(rename = "Receita_2025", default, deserialize_with = "f64_or_zero")]
    pub revenue_2025: f64,
    #[serde(rename = "Lucro_2025", default, deserialize_with = "f64_or_zero")]
    pub profit_2025: f64,
    /// 0 until the month has been reported
    #[serde(rename = "Receita_2026", default, deserialize_with = "f64_or_zero")]
    pub revenue_2026: f64,
    #[serde(rename = "Lucro_2026", default, deserialize_with = "f64_or_zero")]
    pub profit_2026: f64,
    #[serde(rename = "Cupons_2025", default, deserialize_with = "f64_or_zero")]
    pub coupons_2025: f64,
    #[serde(rename = "SKUs_2025", default, deserialize_with = "f64_or_zero")]
    pub skus_2025: f64,
}

impl YoyRow {
    /// The current year has data for this month.
    pub fn is_reported(&self) -> bool {
        self.revenue_2026 > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreported_month() {
        let json = r#"{"Mes":"Março","Mes_Num":3,"Receita_2025":4500,"Lucro_2025":1200,
            "Margem_2025":26.67,"Cupons_2025":410,"SKUs_2025":980,"Receita_2026":0,
            "Lucro_2026":0,"Var_Receita_Pct":0}"#;
        let row: YoyRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.month_num, 3);
        assert!(!row.is_reported());
        assert_eq!(row.skus_2025, 980.0);
    }
}

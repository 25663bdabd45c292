use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::serde_helpers::{string_or_empty, u32_or_zero};

/// Calendar dimension row (`calendario.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    #[serde(rename = "Data", default, deserialize_with = "string_or_empty")]
    pub date: String,
    #[serde(rename = "Dia_Semana", default, deserialize_with = "string_or_empty")]
    pub weekday: String,
    #[serde(rename = "Mes", default, deserialize_with = "u32_or_zero")]
    pub month: u32,
    #[serde(rename = "Ano", default, deserialize_with = "u32_or_zero")]
    pub year: u32,
    /// Mon–Sat and not a holiday
    #[serde(rename = "E_Util", default, deserialize_with = "sim_nao")]
    pub is_business_day: bool,
    #[serde(rename = "E_Feriado", default, deserialize_with = "sim_nao")]
    pub is_holiday: bool,
}

/// The exporter writes flags as "Sim"/"Não".
fn sim_nao<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(value.trim().eq_ignore_ascii_case("sim"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_flags() {
        let json = r#"{"Data":"2026-01-01","Dia":1,"Dia_Semana":"Quinta","Mes":1,"Ano":2026,
            "E_Util":"Não","E_Domingo":"Não","E_Feriado":"Sim"}"#;
        let day: CalendarDay = serde_json::from_str(json).unwrap();
        assert!(!day.is_business_day);
        assert!(day.is_holiday);
        assert_eq!(day.year, 2026);
    }
}

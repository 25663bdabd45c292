//! Lenient field decoders for the exported JSON aggregates.
//!
//! The exporter writes `null` for NaN cells, so every numeric column must
//! tolerate `null` as well as a missing key. Combine with `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .filter(|v| v.is_finite())
        .unwrap_or(0.0))
}

/// Integer columns sometimes arrive as floats (`3.0`) after a spreadsheet round-trip.
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        Ok(value.round() as u32)
    } else {
        Ok(0)
    }
}

pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "f64_or_zero")]
        value: f64,
        #[serde(default, deserialize_with = "u32_or_zero")]
        month: u32,
        #[serde(default, deserialize_with = "string_or_empty")]
        name: String,
    }

    #[test]
    fn test_nulls_and_missing_become_defaults() {
        let row: Row = serde_json::from_str(r#"{"value": null, "name": null}"#).unwrap();
        assert_eq!(row.value, 0.0);
        assert_eq!(row.month, 0);
        assert_eq!(row.name, "");
    }

    #[test]
    fn test_float_month_is_rounded() {
        let row: Row = serde_json::from_str(r#"{"value": 12.5, "month": 3.0, "name": "x"}"#).unwrap();
        assert_eq!(row.value, 12.5);
        assert_eq!(row.month, 3);
        assert_eq!(row.name, "x");
    }
}

use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::serde_helpers::{f64_or_zero, string_or_empty};

/// Direction of the replacement-cost change behind an erosion alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    CostRose,
    CostFell,
    None,
}

impl AlertKind {
    /// The producer only marks direction inside free text
    /// ("🔴 CUSTO SUBIU", "🟢 CUSTO CAIU", "⚪ Estável").
    pub fn from_tag(tag: &str) -> Self {
        if tag.contains("SUBIU") {
            Self::CostRose
        } else if tag.contains("CAIU") {
            Self::CostFell
        } else {
            Self::None
        }
    }
}

/// Curve-A product whose markdown moved between the last two purchase entries
/// (`erosao.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErosionAlert {
    #[serde(rename = "Produto", default, deserialize_with = "string_or_empty")]
    pub product: String,
    #[serde(rename = "Vlr_Venda", default, deserialize_with = "f64_or_zero")]
    pub revenue: f64,
    #[serde(rename = "Margem_Pct", default, deserialize_with = "f64_or_zero")]
    pub margin_pct: f64,
    #[serde(rename = "Markdown_Pct", default, deserialize_with = "f64_or_zero")]
    pub markdown_pct: f64,
    #[serde(rename = "Markdown_Ult_Entrada", default, deserialize_with = "f64_or_zero")]
    pub last_entry_markdown_pct: f64,
    /// Percentage points between current markdown and last-entry markdown
    #[serde(rename = "Erosao_Margem", default, deserialize_with = "f64_or_zero")]
    pub erosion_points: f64,
    #[serde(rename = "Alerta", default = "no_alert", deserialize_with = "kind_from_tag")]
    pub alert: AlertKind,
}

fn no_alert() -> AlertKind {
    AlertKind::None
}

fn kind_from_tag<'de, D>(deserializer: D) -> Result<AlertKind, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(AlertKind::from_tag(&tag))
}

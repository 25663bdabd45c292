use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::{f64_or_zero, string_or_empty, u32_or_zero};

/// Store-wide totals for one day (`vendas_diarias.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    /// Date in format "YYYY-MM-DD"
    #[serde(rename = "Data", default, deserialize_with = "string_or_empty")]
    pub date: String,
    /// Weekday name as exported ("Monday" or "Segunda")
    #[serde(rename = "Dia_Semana", default, deserialize_with = "string_or_empty")]
    pub weekday: String,
    /// ISO week number
    #[serde(rename = "Semana", default, deserialize_with = "u32_or_zero")]
    pub week_number: u32,
    #[serde(rename = "Vlr_Venda", default, deserialize_with = "f64_or_zero")]
    pub revenue: f64,
    #[serde(rename = "Qtde_Documentos", default, deserialize_with = "f64_or_zero")]
    pub document_count: f64,
}

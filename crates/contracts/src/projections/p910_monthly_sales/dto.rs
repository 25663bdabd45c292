use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::{f64_or_zero, string_or_empty};

/// One category's totals for the reporting month (`vendas_mensais.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    #[serde(rename = "Categoria", default, deserialize_with = "string_or_empty")]
    pub category: String,
    #[serde(rename = "Vlr_Venda", default, deserialize_with = "f64_or_zero")]
    pub revenue: f64,
    #[serde(rename = "Vlr_Lucro", default, deserialize_with = "f64_or_zero")]
    pub gross_profit: f64,
    /// Gross margin of the category, in percent.
    #[serde(rename = "Markdown_Pct", default, deserialize_with = "f64_or_zero")]
    pub markdown_pct: f64,
    /// Number of fiscal coupons (customer visits).
    #[serde(rename = "Qtde_Documentos", default, deserialize_with = "f64_or_zero")]
    pub document_count: f64,
}

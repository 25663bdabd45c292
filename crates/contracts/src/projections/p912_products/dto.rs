use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::serde_helpers::{f64_or_zero, string_or_empty, u32_or_zero};

/// Position of a product in the turnover × margin matrix.
///
/// Assigned upstream; the export carries it as a decorated label
/// ("⭐ Estrela", "💰 Gerador de Caixa", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductClass {
    Star,
    CashGenerator,
    Opportunity,
    DeadWeight,
    Unclassified,
}

impl ProductClass {
    pub const ALL: [ProductClass; 4] = [
        ProductClass::Star,
        ProductClass::CashGenerator,
        ProductClass::Opportunity,
        ProductClass::DeadWeight,
    ];

    pub fn from_label(label: &str) -> Self {
        if label.contains("Estrela") {
            Self::Star
        } else if label.contains("Gerador") {
            Self::CashGenerator
        } else if label.contains("Oportunidade") {
            Self::Opportunity
        } else if label.contains("Peso Morto") {
            Self::DeadWeight
        } else {
            Self::Unclassified
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Star => "⭐ Estrela",
            Self::CashGenerator => "💰 Gerador de Caixa",
            Self::Opportunity => "🔍 Oportunidade",
            Self::DeadWeight => "⚠️ Peso Morto",
            Self::Unclassified => "Sem classificação",
        }
    }
}

/// ABC curve position; only curve A is tracked individually upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveClass {
    A,
    Other,
}

/// Product dimension row (`produtos.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Produto", default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(rename = "Categoria", default, deserialize_with = "string_or_empty")]
    pub category: String,
    #[serde(rename = "Curva", default = "other_curve", deserialize_with = "curve_from_label")]
    pub curve: CurveClass,
    #[serde(
        rename = "Classificacao",
        default = "unclassified",
        deserialize_with = "class_from_label"
    )]
    pub classification: ProductClass,
    #[serde(rename = "Receita_Total", default, deserialize_with = "f64_or_zero")]
    pub revenue_total: f64,
    #[serde(rename = "Lucro_Total", default, deserialize_with = "f64_or_zero")]
    pub profit_total: f64,
    #[serde(rename = "Margem_Media", default, deserialize_with = "f64_or_zero")]
    pub margin_avg: f64,
    /// Fraction of operating days with at least one sale (0..1)
    #[serde(rename = "Giro", default, deserialize_with = "f64_or_zero")]
    pub turnover: f64,
    #[serde(rename = "Dias_Vendidos", default, deserialize_with = "u32_or_zero")]
    pub days_sold: u32,
}

fn other_curve() -> CurveClass {
    CurveClass::Other
}

fn unclassified() -> ProductClass {
    ProductClass::Unclassified
}

fn curve_from_label<'de, D>(deserializer: D) -> Result<CurveClass, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(if label.trim() == "A" {
        CurveClass::A
    } else {
        CurveClass::Other
    })
}

fn class_from_label<'de, D>(deserializer: D) -> Result<ProductClass, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(ProductClass::from_label(&label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_from_decorated_label() {
        assert_eq!(ProductClass::from_label("⭐ Estrela"), ProductClass::Star);
        assert_eq!(ProductClass::from_label("💰 Gerador de Caixa"), ProductClass::CashGenerator);
        assert_eq!(ProductClass::from_label("🔍 Oportunidade"), ProductClass::Opportunity);
        assert_eq!(ProductClass::from_label("⚠️ Peso Morto"), ProductClass::DeadWeight);
        assert_eq!(ProductClass::from_label("?"), ProductClass::Unclassified);
    }

    #[test]
    fn test_decode_product_row() {
        let json = r#"{"Produto":"ARROZ 5KG","Curva":"A","Classificacao":"⭐ Estrela",
            "Dias_Vendidos":25,"Dias_Operacao":27,"Giro":0.926,"Receita_Total":3120.4,
            "Lucro_Total":810.2,"Margem_Media":26.0}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.curve, CurveClass::A);
        assert_eq!(product.classification, ProductClass::Star);
        assert_eq!(product.days_sold, 25);
        assert_eq!(product.category, "");
    }

    #[test]
    fn test_missing_labels_fall_back() {
        let product: Product = serde_json::from_str(r#"{"Produto":"X","Curva":"B/C"}"#).unwrap();
        assert_eq!(product.curve, CurveClass::Other);
        assert_eq!(product.classification, ProductClass::Unclassified);
    }
}

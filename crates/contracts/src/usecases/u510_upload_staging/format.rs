use serde::{Deserialize, Serialize};

/// Column layout of an uploaded spreadsheet, inferred from its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadFormat {
    Sales,
    Products,
    Simple,
    Unknown,
}

impl UploadFormat {
    /// Infers the layout from the header names of the first row.
    /// Headers are compared uppercased and trimmed.
    pub fn detect<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keys: Vec<String> = headers
            .into_iter()
            .map(|k| k.trim().to_uppercase())
            .collect();
        let has_all = |cols: &[&str]| cols.iter().all(|c| keys.iter().any(|k| k == c));

        if has_all(&["VLR_VENDA", "CUSTO", "QTDE_DOCUMENTOS"]) {
            Self::Sales
        } else if has_all(&["CUSTO_MEDIO", "PRECO", "ESTOQUE"]) {
            Self::Products
        } else if has_all(&["DATA", "CATEGORIA", "PRODUTO", "FATURAMENTO"]) {
            Self::Simple
        } else {
            Self::Unknown
        }
    }

    /// Columns that must all be present for the upload to be accepted
    pub fn expected_columns(self) -> &'static [&'static str] {
        match self {
            Self::Sales => &[
                "Data",
                "Categoria",
                "Produto",
                "Quantidade",
                "Valor_Unitario",
                "Vlr_Venda",
                "Custo",
                "Vlr_Lucro",
                "Qtde_Documentos",
            ],
            Self::Products => &["Produto", "Categoria", "Custo_Medio", "Preco", "Estoque"],
            Self::Simple => &["Data", "Categoria", "Produto", "Faturamento"],
            Self::Unknown => &[],
        }
    }

    /// Columns that hold amounts or quantities in any known layout.
    /// All other columns, codes included, are kept as text.
    pub const NUMERIC_COLUMNS: [&'static str; 10] = [
        "QUANTIDADE",
        "VALOR_UNITARIO",
        "VLR_VENDA",
        "CUSTO",
        "VLR_LUCRO",
        "QTDE_DOCUMENTOS",
        "CUSTO_MEDIO",
        "PRECO",
        "ESTOQUE",
        "FATURAMENTO",
    ];

    pub fn is_numeric_column(header: &str) -> bool {
        let key = header.trim().to_uppercase();
        Self::NUMERIC_COLUMNS.contains(&key.as_str())
    }

    /// Tag used in storage keys (`data_upload_<tag>_<timestamp>`)
    pub fn storage_tag(self) -> &'static str {
        match self {
            Self::Sales => "vendas",
            Self::Products => "produtos",
            Self::Simple => "simples",
            Self::Unknown => "desconhecido",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_formats() {
        assert_eq!(
            UploadFormat::detect([" vlr_venda", "Custo", "QTDE_DOCUMENTOS", "Data"]),
            UploadFormat::Sales
        );
        assert_eq!(
            UploadFormat::detect(["Produto", "Custo_Medio", "Preco", "Estoque"]),
            UploadFormat::Products
        );
        assert_eq!(
            UploadFormat::detect(["Data", "Categoria", "Produto", "Faturamento"]),
            UploadFormat::Simple
        );
        assert_eq!(UploadFormat::detect(["Nome", "Valor"]), UploadFormat::Unknown);
    }

    #[test]
    fn test_numeric_columns_ignore_case() {
        assert!(UploadFormat::is_numeric_column(" Vlr_Venda "));
        assert!(UploadFormat::is_numeric_column("estoque"));
        assert!(!UploadFormat::is_numeric_column("Codigo"));
        assert!(!UploadFormat::is_numeric_column("Data"));
    }

    #[test]
    fn test_sales_wins_over_simple() {
        let headers = ["DATA", "CATEGORIA", "PRODUTO", "FATURAMENTO", "VLR_VENDA", "CUSTO", "QTDE_DOCUMENTOS"];
        assert_eq!(UploadFormat::detect(headers), UploadFormat::Sales);
    }
}

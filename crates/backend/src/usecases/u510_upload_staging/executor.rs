use chrono::{DateTime, Utc};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u510_upload_staging::{
    UploadCsvRequest, UploadFormat, UploadRequest, UploadResponse, UploadStaging, ValidationReport,
};
use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};
use thiserror::Error;

use super::csv_reader::{parse_csv, CsvReadError};
use crate::shared::data::upload_storage;

type Row = Map<String, Value>;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload contains no rows")]
    Empty,

    #[error("{}", .0.message)]
    Invalid(ValidationReport),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] CsvReadError),

    #[error("failed to store upload: {0:#}")]
    Storage(anyhow::Error),
}

/// Detects the layout from the first row and checks its expected columns.
pub fn validate(rows: &[Row]) -> ValidationReport {
    let Some(first) = rows.first() else {
        return ValidationReport {
            format: UploadFormat::Unknown,
            is_valid: false,
            missing_columns: Vec::new(),
            message: "Arquivo vazio".to_string(),
        };
    };

    let headers: Vec<String> = first.keys().map(|k| k.trim().to_uppercase()).collect();
    let format = UploadFormat::detect(headers.iter().map(String::as_str));

    if format == UploadFormat::Unknown {
        return ValidationReport {
            format,
            is_valid: false,
            missing_columns: Vec::new(),
            message: "Formato não reconhecido".to_string(),
        };
    }

    let missing_columns: Vec<String> = format
        .expected_columns()
        .iter()
        .filter(|col| !headers.iter().any(|h| *h == col.to_uppercase()))
        .map(|col| col.to_string())
        .collect();

    let is_valid = missing_columns.is_empty();
    let message = if is_valid {
        format!("Formato {} válido", format.storage_tag())
    } else {
        format!("Colunas faltando: {}", missing_columns.join(", "))
    };

    ValidationReport {
        format,
        is_valid,
        missing_columns,
        message,
    }
}

/// Uppercases and trims every key; values are kept as they are.
pub fn normalize_rows(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(k, v)| (k.trim().to_uppercase(), v))
                .collect()
        })
        .collect()
}

pub fn storage_key(format: UploadFormat, at: DateTime<Utc>) -> String {
    format!("data_upload_{}_{}", format.storage_tag(), at.timestamp_millis())
}

/// Validates, normalizes and stores one upload.
pub async fn stage(db: &DatabaseConnection, request: UploadRequest) -> Result<UploadResponse, UploadError> {
    if request.rows.is_empty() {
        return Err(UploadError::Empty);
    }

    let validation = validate(&request.rows);
    if !validation.is_valid {
        tracing::warn!(
            "{}: rejected upload {:?}: {}",
            UploadStaging::full_name(),
            request.file_name,
            validation.message
        );
        return Err(UploadError::Invalid(validation));
    }

    let rows = normalize_rows(request.rows);
    let stored_at = Utc::now();
    let key = storage_key(validation.format, stored_at);

    upload_storage::save(
        db,
        &key,
        validation.format.storage_tag(),
        request.file_name.as_deref(),
        &rows,
        stored_at,
    )
    .await
    .map_err(UploadError::Storage)?;

    tracing::info!(
        "{}: staged {} rows as {}",
        UploadStaging::full_name(),
        rows.len(),
        key
    );

    Ok(UploadResponse {
        key,
        format: validation.format,
        row_count: rows.len(),
        stored_at,
        validation,
    })
}

/// Same as [`stage`], starting from CSV text.
pub async fn stage_csv(db: &DatabaseConnection, request: UploadCsvRequest) -> Result<UploadResponse, UploadError> {
    let rows = parse_csv(&request.content, request.delimiter)?;
    stage(
        db,
        UploadRequest {
            file_name: request.file_name,
            rows,
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use chrono::TimeZone;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_columns_reported() {
        let rows = vec![row(json!({"Vlr_Venda": 10, "Custo": 5, "Qtde_Documentos": 1, "Data": "x"}))];
        let report = validate(&rows);
        assert_eq!(report.format, UploadFormat::Sales);
        assert!(!report.is_valid);
        assert_eq!(
            report.missing_columns,
            vec!["Categoria", "Produto", "Quantidade", "Valor_Unitario", "Vlr_Lucro"]
        );
        assert!(report.message.starts_with("Colunas faltando: Categoria"));
    }

    #[test]
    fn test_unknown_format_is_invalid() {
        let report = validate(&[row(json!({"foo": 1}))]);
        assert_eq!(report.format, UploadFormat::Unknown);
        assert!(!report.is_valid);
    }

    #[test]
    fn test_normalize_and_key() {
        let rows = normalize_rows(vec![row(json!({" produto ": "Arroz", "Preco": 5.5}))]);
        assert_eq!(rows[0]["PRODUTO"], "Arroz");
        assert_eq!(rows[0]["PRECO"], 5.5);

        let at = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            storage_key(UploadFormat::Products, at),
            format!("data_upload_produtos_{}", at.timestamp_millis())
        );
    }

    #[tokio::test]
    async fn test_stage_csv_persists_rows() {
        let db = connect_in_memory().await;
        let request = UploadCsvRequest {
            file_name: Some("marco.csv".into()),
            content: "Data;Categoria;Produto;Faturamento\n2026-03-01;Bebidas;Água;12.5\n".into(),
            delimiter: None,
        };

        let response = stage_csv(&db, request).await.unwrap();
        assert_eq!(response.format, UploadFormat::Simple);
        assert_eq!(response.row_count, 1);
        assert!(response.key.starts_with("data_upload_simples_"));

        let stored = upload_storage::get_rows(&db, &response.key).await.unwrap().unwrap();
        assert_eq!(stored[0]["FATURAMENTO"], 12.5);
    }

    #[tokio::test]
    async fn test_stage_csv_rejects_non_ascii_delimiter() {
        let db = connect_in_memory().await;
        let request = UploadCsvRequest {
            file_name: Some("tab.csv".into()),
            content: "Produto\tPreco\nA\t1\n".into(),
            delimiter: Some('ĉ'),
        };

        let err = stage_csv(&db, request).await.unwrap_err();
        assert!(matches!(err, UploadError::Csv(CsvReadError::Delimiter('ĉ'))));
        assert!(err.to_string().contains("'ĉ'"));
        assert!(upload_storage::list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stage_csv_keeps_leading_zero_codes() {
        let db = connect_in_memory().await;
        let request = UploadCsvRequest {
            file_name: None,
            content: "Produto;Categoria;Custo_Medio;Preco;Estoque\n0789123;Mercearia;3.2;5.5;12\n".into(),
            delimiter: None,
        };

        let response = stage_csv(&db, request).await.unwrap();
        let stored = upload_storage::get_rows(&db, &response.key).await.unwrap().unwrap();
        assert_eq!(stored[0]["PRODUTO"], "0789123");
        assert_eq!(stored[0]["ESTOQUE"], json!(12));
    }

    #[tokio::test]
    async fn test_stage_rejects_empty_and_invalid() {
        let db = connect_in_memory().await;
        let empty = UploadRequest {
            file_name: None,
            rows: Vec::new(),
        };
        assert!(matches!(stage(&db, empty).await, Err(UploadError::Empty)));

        let invalid = UploadRequest {
            file_name: None,
            rows: vec![row(json!({"Produto": "x", "Custo_Medio": 1, "Preco": 2}))],
        };
        assert!(matches!(stage(&db, invalid).await, Err(UploadError::Invalid(_))));
        assert!(upload_storage::list(&db).await.unwrap().is_empty());
    }
}

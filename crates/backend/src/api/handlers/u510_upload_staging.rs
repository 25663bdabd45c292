use axum::extract::Multipart;
use axum::{http::StatusCode, Json};
use contracts::usecases::u510_upload_staging::{
    UploadCsvRequest, UploadListResponse, UploadRequest, UploadResponse,
};
use serde_json::{json, Value};

use crate::shared::data::db::get_connection;
use crate::shared::data::upload_storage;
use crate::usecases::u510_upload_staging::executor::{self, UploadError};

type JsonError = (StatusCode, Json<Value>);

fn upload_error(e: UploadError) -> JsonError {
    let status = match &e {
        UploadError::Invalid(report) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!(report)));
        }
        UploadError::Empty | UploadError::Csv(_) => StatusCode::BAD_REQUEST,
        UploadError::Storage(_) => {
            tracing::error!("U510: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": e.to_string() })))
}

fn no_database(e: anyhow::Error) -> JsonError {
    tracing::error!("U510: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "staging database unavailable" })),
    )
}

/// POST /api/u510/upload
pub async fn upload(Json(request): Json<UploadRequest>) -> Result<Json<UploadResponse>, JsonError> {
    tracing::info!(
        "U510: upload {:?} with {} rows",
        request.file_name,
        request.rows.len()
    );
    let db = get_connection().map_err(no_database)?;
    executor::stage(db, request).await.map(Json).map_err(upload_error)
}

/// POST /api/u510/upload_csv
pub async fn upload_csv(Json(request): Json<UploadCsvRequest>) -> Result<Json<UploadResponse>, JsonError> {
    tracing::info!(
        "U510: CSV upload {:?} ({} bytes)",
        request.file_name,
        request.content.len()
    );
    let db = get_connection().map_err(no_database)?;
    executor::stage_csv(db, request).await.map(Json).map_err(upload_error)
}

/// POST /api/u510/upload_file
///
/// Multipart form: `file` (CSV, UTF-8) and an optional one-character `delimiter`.
pub async fn upload_file(mut multipart: Multipart) -> Result<Json<UploadResponse>, JsonError> {
    let bad_request = |message: String| (StatusCode::BAD_REQUEST, Json(json!({ "error": message })));

    let mut request = UploadCsvRequest {
        file_name: None,
        content: String::new(),
        delimiter: None,
    };
    let mut has_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                request.file_name = field.file_name().map(str::to_string);
                request.content = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("file is not valid UTF-8 text: {e}")))?;
                has_file = true;
            }
            Some("delimiter") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(e.to_string()))?;
                request.delimiter = text.chars().next();
            }
            other => tracing::debug!("U510: ignoring multipart field {:?}", other),
        }
    }

    if !has_file {
        return Err(bad_request("missing 'file' field".to_string()));
    }

    tracing::info!(
        "U510: file upload {:?} ({} bytes)",
        request.file_name,
        request.content.len()
    );
    let db = get_connection().map_err(no_database)?;
    executor::stage_csv(db, request).await.map(Json).map_err(upload_error)
}

/// GET /api/u510/uploads
pub async fn list_uploads() -> Result<Json<UploadListResponse>, StatusCode> {
    let db = get_connection().map_err(|e| {
        tracing::error!("U510: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    match upload_storage::list(db).await {
        Ok(uploads) => Ok(Json(UploadListResponse { uploads })),
        Err(e) => {
            tracing::error!("U510: failed to list uploads: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u510_upload_staging::csv_reader::CsvReadError;
    use contracts::usecases::u510_upload_staging::{UploadFormat, ValidationReport};

    #[test]
    fn test_bad_delimiter_maps_to_bad_request() {
        let (status, Json(body)) = upload_error(UploadError::Csv(CsvReadError::Delimiter('§')));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("'§'"));
    }

    #[test]
    fn test_invalid_upload_returns_report() {
        let report = ValidationReport {
            format: UploadFormat::Products,
            is_valid: false,
            missing_columns: vec!["Estoque".to_string()],
            message: "Colunas faltando: Estoque".to_string(),
        };
        let (status, Json(body)) = upload_error(UploadError::Invalid(report));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["missing_columns"][0], "Estoque");
    }
}

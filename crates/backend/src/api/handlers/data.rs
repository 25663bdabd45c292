use std::path::Path;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::data_status::DataStatusResponse;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::shared::config::get_data_dir;
use crate::shared::state::SharedState;

type JsonError = (StatusCode, Json<Value>);

fn json_error(status: StatusCode, message: impl Into<String>) -> JsonError {
    (status, Json(json!({ "error": message.into() })))
}

#[derive(Debug, Deserialize)]
pub struct DataFileQuery {
    #[serde(default)]
    pub file: Option<String>,
}

/// Dataset stems are lowercase ASCII letters and underscores only.
pub fn is_valid_stem(stem: &str) -> bool {
    !stem.is_empty() && stem.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

/// Reads `<dir>/<stem>.json` after checking the stem.
pub async fn read_data_file(dir: &Path, stem: Option<&str>) -> Result<Vec<u8>, JsonError> {
    let stem = match stem {
        Some(s) if is_valid_stem(s) => s,
        Some(s) => {
            tracing::warn!("Data: rejected file name {:?}", s);
            return Err(json_error(StatusCode::BAD_REQUEST, "Invalid file name"));
        }
        None => return Err(json_error(StatusCode::BAD_REQUEST, "Missing 'file' parameter")),
    };

    let path = dir.join(format!("{stem}.json"));
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Data: {} not found", path.display());
            Err(json_error(StatusCode::NOT_FOUND, format!("File not found: {stem}.json")))
        }
        Err(e) => {
            tracing::error!("Data: failed to read {}: {}", path.display(), e);
            Err(json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file"))
        }
    }
}

/// GET /api/data?file=vendas_mensal
pub async fn get_data_file(
    State(state): State<SharedState>,
    Query(query): Query<DataFileQuery>,
) -> Result<Response, JsonError> {
    let dir = get_data_dir(&state.config);
    let bytes = read_data_file(&dir, query.file.as_deref()).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response())
}

/// POST /api/data/reload
///
/// Re-runs the whole acquisition chain. The previous datasets stay in
/// place when it fails.
pub async fn reload(State(state): State<SharedState>) -> Result<Json<DataStatusResponse>, JsonError> {
    tracing::info!("Data: reload requested");
    match state.reload().await {
        Ok(status) => Ok(Json(status)),
        Err(e) => Err(json_error(StatusCode::SERVICE_UNAVAILABLE, e.to_string())),
    }
}

/// GET /api/data/status
pub async fn get_status(State(state): State<SharedState>) -> Json<DataStatusResponse> {
    Json(state.status().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_validation() {
        assert!(is_valid_stem("vendas_mensal"));
        assert!(!is_valid_stem("../etc/passwd"));
        assert!(!is_valid_stem("Vendas"));
        assert!(!is_valid_stem("yoy2"));
        assert!(!is_valid_stem(""));
    }

    #[tokio::test]
    async fn test_read_data_file_statuses() {
        let dir = std::env::temp_dir().join(format!("bi-data-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("produtos.json"), b"[]").unwrap();

        assert_eq!(read_data_file(&dir, Some("produtos")).await.unwrap(), b"[]");

        let (status, _) = read_data_file(&dir, Some("calendario")).await.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = read_data_file(&dir, Some("../x")).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0["error"], "Invalid file name");

        let (status, _) = read_data_file(&dir, None).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        std::fs::remove_dir_all(&dir).ok();
    }
}

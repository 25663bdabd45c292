use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UploadFormat;

/// Outcome of checking an upload against its detected layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub format: UploadFormat,
    pub is_valid: bool,
    /// Expected columns not found, uppercased
    pub missing_columns: Vec<String>,
    pub message: String,
}

/// Returned after a successful staging write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub key: String,
    pub format: UploadFormat,
    pub row_count: usize,
    pub stored_at: DateTime<Utc>,
    pub validation: ValidationReport,
}

/// One entry of the upload history (rows are not included)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedUpload {
    pub key: String,
    pub format: String,
    pub file_name: Option<String>,
    pub row_count: i64,
    pub stored_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadListResponse {
    pub uploads: Vec<StagedUpload>,
}

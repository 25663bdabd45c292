use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rows already parsed from a spreadsheet by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Original file name, kept for the upload history
    #[serde(default)]
    pub file_name: Option<String>,
    pub rows: Vec<Map<String, Value>>,
}

/// Raw CSV text; the first line is the header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCsvRequest {
    #[serde(default)]
    pub file_name: Option<String>,
    pub content: String,
    /// Field delimiter, `,` when omitted (`;` is common in pt-BR exports)
    #[serde(default)]
    pub delimiter: Option<char>,
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of the in-memory dataset snapshot (`GET /api/data/status`,
/// `POST /api/data/reload`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataStatusResponse {
    pub loaded: bool,
    /// Source that delivered the current snapshot
    pub source: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    /// Row count per dataset file stem
    pub row_counts: BTreeMap<String, usize>,
    /// Last load failure, kept until the next successful load
    pub last_error: Option<String>,
}

//! Fetches the six exported aggregates from the first source that can
//! deliver all of them.
//!
//! Sources are tried strictly in order. Inside one source the six fetches run
//! concurrently and the source only counts when every file arrives and parses
//! as a JSON object or array. Results of different sources are never mixed.

pub mod http_source;

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use futures::future::try_join_all;
use thiserror::Error;

pub use http_source::{HttpSource, Strategy};

/// The six exported aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatasetName {
    MonthlySales,
    DailySales,
    Products,
    Calendar,
    Yoy,
    Erosion,
}

impl DatasetName {
    pub const ALL: [DatasetName; 6] = [
        DatasetName::MonthlySales,
        DatasetName::DailySales,
        DatasetName::Products,
        DatasetName::Calendar,
        DatasetName::Yoy,
        DatasetName::Erosion,
    ];

    /// File name without `.json`, as published by the exporter
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::MonthlySales => "vendas_mensais",
            Self::DailySales => "vendas_diarias",
            Self::Products => "produtos",
            Self::Calendar => "calendario",
            Self::Yoy => "yoy",
            Self::Erosion => "erosao",
        }
    }

    pub fn from_stem(stem: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.file_stem() == stem)
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

pub type RawDatasets = HashMap<DatasetName, serde_json::Value>;

/// Why one dataset could not be taken from a source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    Url(String),

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("unexpected content type {content_type:?} from {url}")]
    ContentType { url: String, content_type: String },

    #[error("{0}")]
    Unavailable(String),

    #[error("invalid JSON: {0}")]
    Parse(String),

    #[error("payload is not a JSON object or array")]
    NotAContainer,
}

/// Failure of one source, keyed by the first dataset that failed.
#[derive(Debug)]
pub struct SourceFailure {
    pub source: String,
    pub dataset: DatasetName,
    pub error: FetchError,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.source, self.dataset, self.error)
    }
}

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("{}", exhausted_message(.attempts))]
    Exhausted { attempts: Vec<SourceFailure> },
}

fn exhausted_message(attempts: &[SourceFailure]) -> String {
    let mut msg = String::from("could not load the dashboard data from any source");
    for attempt in attempts {
        msg.push_str(&format!("\n  - {attempt}"));
    }
    msg.push_str(
        "\nRemediation:\
         \n  1. check that the six JSON exports exist in the configured data directory\
         \n  2. check [data].base_url and [data].document_url in config.toml\
         \n  3. run with RUST_LOG=debug for per-request details",
    );
    msg
}

/// Maps a dataset name to its raw bytes.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable label used in logs and errors
    fn label(&self) -> String;

    async fn fetch(&self, dataset: DatasetName) -> Result<Vec<u8>, FetchError>;
}

/// Result of a successful acquisition.
#[derive(Debug)]
pub struct Acquired {
    pub source: String,
    pub datasets: RawDatasets,
}

/// Accepts only JSON objects and arrays.
pub fn parse_container(bytes: &[u8]) -> Result<serde_json::Value, FetchError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| FetchError::Parse(e.to_string()))?;
    if value.is_object() || value.is_array() {
        Ok(value)
    } else {
        Err(FetchError::NotAContainer)
    }
}

async fn fetch_all(source: &dyn DatasetSource) -> Result<RawDatasets, (DatasetName, FetchError)> {
    let fetches = DatasetName::ALL.into_iter().map(|name| async move {
        let bytes = source.fetch(name).await.map_err(|e| (name, e))?;
        let value = parse_container(&bytes).map_err(|e| (name, e))?;
        Ok::<_, (DatasetName, FetchError)>((name, value))
    });
    let loaded = try_join_all(fetches).await?;
    Ok(loaded.into_iter().collect())
}

/// Tries each source in order and returns the first complete set.
pub async fn acquire(sources: &[Box<dyn DatasetSource>]) -> Result<Acquired, AcquisitionError> {
    let mut attempts = Vec::new();

    for source in sources {
        let label = source.label();
        tracing::info!("Loading datasets from {}", label);

        match fetch_all(source.as_ref()).await {
            Ok(datasets) => {
                tracing::info!("Loaded {} datasets from {}", datasets.len(), label);
                return Ok(Acquired {
                    source: label,
                    datasets,
                });
            }
            Err((dataset, error)) => {
                tracing::warn!("Source {} failed on {}: {}", label, dataset, error);
                attempts.push(SourceFailure {
                    source: label,
                    dataset,
                    error,
                });
            }
        }
    }

    Err(AcquisitionError::Exhausted { attempts })
}

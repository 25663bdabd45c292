use serde::Deserialize;
use std::path::{Path, PathBuf};

use contracts::shared::indicators::FixedCost;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Where the exported aggregates are published and fetched from
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    pub base_url: String,
    /// Page URL the relative `data/<file>.json` strategy resolves against
    pub document_url: String,
    /// Directory served under `/data` and `/api/data`
    pub local_dir: String,
    /// 0 = no timeout
    pub request_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".into(),
            document_url: "http://127.0.0.1:3000/dashboard/".into(),
            local_dir: "data".into(),
            request_timeout_secs: 0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MetricsConfig {
    /// Monthly fixed cost used until changed through the settings API
    pub fixed_cost: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            fixed_cost: FixedCost::DEFAULT,
        }
    }
}

impl MetricsConfig {
    /// Configured fixed cost, or the default when the value is not positive.
    pub fn fixed_cost(&self) -> FixedCost {
        FixedCost::new(self.fixed_cost).unwrap_or_else(|| {
            tracing::warn!(
                "Ignoring [metrics].fixed_cost = {}, using {}",
                self.fixed_cost,
                FixedCost::DEFAULT
            );
            FixedCost::default()
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "target/db/staging.db".into(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[data]
base_url = "http://127.0.0.1:3000"
document_url = "http://127.0.0.1:3000/dashboard/"
local_dir = "data"
request_timeout_secs = 0

[metrics]
fixed_cost = 16913.46

[database]
path = "target/db/staging.db"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(&config.database.path)
}

/// Directory holding the exported JSON files.
///
/// Relative paths are tried next to the executable first, then against the
/// working directory.
pub fn get_data_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.data.local_dir);

    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let candidate = exe_dir.join(dir);
            if candidate.is_dir() {
                return candidate;
            }
        }
    }

    PathBuf::from(&config.data.local_dir)
}

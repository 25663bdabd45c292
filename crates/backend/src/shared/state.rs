use std::sync::Arc;

use chrono::Utc;
use contracts::shared::data_status::DataStatusResponse;
use contracts::shared::indicators::FixedCost;
use tokio::sync::{Mutex, RwLock};

use super::config::Config;
use super::data::acquisition::{acquire, DatasetSource};
use super::data::datasets::{Datasets, LoadError};
use super::indicators::registry::IndicatorRegistry;

/// Process-wide state shared by every handler.
///
/// Datasets are swapped as a whole on reload; readers keep the `Arc`
/// they cloned, so a request never sees a half-loaded set.
pub struct AppState {
    pub config: Config,
    pub registry: IndicatorRegistry,
    sources: Vec<Box<dyn DatasetSource>>,
    datasets: RwLock<Option<Arc<Datasets>>>,
    fixed_cost: RwLock<FixedCost>,
    status: RwLock<DataStatusResponse>,
    reload_lock: Mutex<()>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, sources: Vec<Box<dyn DatasetSource>>) -> Self {
        let fixed_cost = config.metrics.fixed_cost();
        Self {
            config,
            registry: IndicatorRegistry::new(),
            sources,
            datasets: RwLock::new(None),
            fixed_cost: RwLock::new(fixed_cost),
            status: RwLock::new(DataStatusResponse::default()),
            reload_lock: Mutex::new(()),
        }
    }

    /// Runs the acquisition chain and replaces the datasets on success.
    ///
    /// On failure the previous datasets stay in place and the error is
    /// recorded in the status.
    pub async fn reload(&self) -> Result<DataStatusResponse, LoadError> {
        let _guard = self.reload_lock.lock().await;

        let loaded = match acquire(&self.sources).await {
            Ok(acquired) => Datasets::from_raw(acquired.datasets)
                .map(|d| (acquired.source, d))
                .map_err(LoadError::from),
            Err(e) => Err(LoadError::from(e)),
        };

        match loaded {
            Ok((source, datasets)) => {
                let row_counts = datasets.row_counts();
                tracing::info!("Datasets loaded from {}: {:?}", source, row_counts);
                *self.datasets.write().await = Some(Arc::new(datasets));
                let status = DataStatusResponse {
                    loaded: true,
                    source: Some(source),
                    loaded_at: Some(Utc::now()),
                    row_counts,
                    last_error: None,
                };
                *self.status.write().await = status.clone();
                Ok(status)
            }
            Err(e) => {
                tracing::error!("Dataset load failed: {}", e);
                self.status.write().await.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn datasets(&self) -> Option<Arc<Datasets>> {
        self.datasets.read().await.clone()
    }

    pub async fn status(&self) -> DataStatusResponse {
        self.status.read().await.clone()
    }

    pub async fn fixed_cost(&self) -> FixedCost {
        *self.fixed_cost.read().await
    }

    pub async fn set_fixed_cost(&self, cost: FixedCost) {
        tracing::info!("Fixed cost set to {:.2}", cost.value());
        *self.fixed_cost.write().await = cost;
    }

    /// Per-request override if valid, otherwise the configured value.
    pub async fn effective_fixed_cost(&self, requested: Option<f64>) -> FixedCost {
        match requested {
            Some(value) => match FixedCost::new(value) {
                Some(cost) => cost,
                None => {
                    tracing::warn!("Ignoring invalid fixed cost override {}", value);
                    self.fixed_cost().await
                }
            },
            None => self.fixed_cost().await,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::StaticSource;
    use super::*;

    #[tokio::test]
    async fn test_reload_publishes_datasets() {
        let state = AppState::new(Config::default(), vec![Box::new(StaticSource { broken: false })]);
        assert!(state.datasets().await.is_none());

        let status = state.reload().await.unwrap();
        assert!(status.loaded);
        assert_eq!(status.source.as_deref(), Some("static"));
        assert_eq!(status.row_counts.len(), 6);
        assert!(state.datasets().await.is_some());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_status_error() {
        let state = AppState::new(Config::default(), vec![Box::new(StaticSource { broken: true })]);
        assert!(state.reload().await.is_err());
        let status = state.status().await;
        assert!(!status.loaded);
        assert!(status.last_error.is_some());
        assert!(state.datasets().await.is_none());
    }

    #[tokio::test]
    async fn test_fixed_cost_override() {
        let state = AppState::new(Config::default(), Vec::new());
        assert_eq!(state.effective_fixed_cost(Some(2000.0)).await.value(), 2000.0);
        assert_eq!(state.effective_fixed_cost(Some(-1.0)).await, FixedCost::default());

        state.set_fixed_cost(FixedCost::new(500.0).unwrap()).await;
        assert_eq!(state.effective_fixed_cost(None).await.value(), 500.0);
    }
}

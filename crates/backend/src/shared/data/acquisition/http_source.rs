use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use super::{DatasetName, DatasetSource, FetchError};
use crate::shared::config::DataConfig;

/// Where the exported files are looked up, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `<base>/api/data?file=<stem>`
    QueryEndpoint,
    /// `<base>/data/<stem>.json`
    AbsoluteStatic,
    /// `data/<stem>.json` relative to the dashboard page
    RelativeStatic,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [
        Strategy::QueryEndpoint,
        Strategy::AbsoluteStatic,
        Strategy::RelativeStatic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::QueryEndpoint => "query endpoint",
            Self::AbsoluteStatic => "absolute static",
            Self::RelativeStatic => "relative static",
        }
    }
}

/// Fetches datasets over HTTP using one [`Strategy`].
pub struct HttpSource {
    strategy: Strategy,
    root: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(strategy: Strategy, root: Url, client: reqwest::Client) -> Self {
        Self {
            strategy,
            root,
            client,
        }
    }

    pub fn url_for(&self, dataset: DatasetName) -> Result<Url, url::ParseError> {
        let stem = dataset.file_stem();
        let base = self.root.as_str().trim_end_matches('/');
        match self.strategy {
            Strategy::QueryEndpoint => {
                let mut url = Url::parse(&format!("{base}/api/data"))?;
                url.query_pairs_mut().append_pair("file", stem);
                Ok(url)
            }
            Strategy::AbsoluteStatic => Url::parse(&format!("{base}/data/{stem}.json")),
            Strategy::RelativeStatic => self.root.join(&format!("data/{stem}.json")),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn label(&self) -> String {
        format!("{} ({})", self.strategy.label(), self.root)
    }

    async fn fetch(&self, dataset: DatasetName) -> Result<Vec<u8>, FetchError> {
        let url = self
            .url_for(dataset)
            .map_err(|e| FetchError::Url(e.to_string()))?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: if e.is_timeout() {
                    "timed out".to_string()
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing header is tolerated; a non-JSON one is not.
        if let Some(value) = response.headers().get(CONTENT_TYPE) {
            let content_type = value.to_str().unwrap_or_default().to_string();
            if !content_type.contains("json") {
                return Err(FetchError::ContentType {
                    url: url.to_string(),
                    content_type,
                });
            }
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

/// HTTP client shared by all strategies. `timeout_secs == 0` disables the timeout.
pub fn build_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    builder.build()
}

/// The three strategies in order, built from `[data]` configuration.
pub fn default_sources(config: &DataConfig) -> anyhow::Result<Vec<Box<dyn super::DatasetSource>>> {
    let client = build_client(config.request_timeout_secs)?;
    let base = Url::parse(&config.base_url)
        .map_err(|e| anyhow::anyhow!("invalid [data].base_url {:?}: {}", config.base_url, e))?;
    let document = Url::parse(&config.document_url).map_err(|e| {
        anyhow::anyhow!("invalid [data].document_url {:?}: {}", config.document_url, e)
    })?;

    Ok(Strategy::ORDER
        .into_iter()
        .map(|strategy| {
            let root = match strategy {
                Strategy::RelativeStatic => document.clone(),
                _ => base.clone(),
            };
            Box::new(HttpSource::new(strategy, root, client.clone())) as Box<dyn super::DatasetSource>
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::acquisition::parse_container;
    use axum::body::Body;
    use axum::http::header;
    use axum::response::Response;
    use axum::routing::get;
    use axum::Router;

    fn source(strategy: Strategy, root: &str) -> HttpSource {
        HttpSource::new(strategy, Url::parse(root).unwrap(), reqwest::Client::new())
    }

    #[test]
    fn test_query_endpoint_url() {
        let s = source(Strategy::QueryEndpoint, "http://127.0.0.1:3000");
        assert_eq!(
            s.url_for(DatasetName::MonthlySales).unwrap().as_str(),
            "http://127.0.0.1:3000/api/data?file=vendas_mensais"
        );
    }

    #[test]
    fn test_absolute_static_keeps_base_path() {
        let s = source(Strategy::AbsoluteStatic, "https://bi.example.com/mercado/");
        assert_eq!(
            s.url_for(DatasetName::Erosion).unwrap().as_str(),
            "https://bi.example.com/mercado/data/erosao.json"
        );
    }

    #[test]
    fn test_relative_static_resolves_against_document() {
        let s = source(Strategy::RelativeStatic, "https://bi.example.com/app/index.html");
        assert_eq!(
            s.url_for(DatasetName::Yoy).unwrap().as_str(),
            "https://bi.example.com/app/data/yoy.json"
        );
    }

    #[test]
    fn test_default_sources_order() {
        let config = DataConfig {
            base_url: "http://127.0.0.1:3000".into(),
            document_url: "http://127.0.0.1:3000/dashboard/".into(),
            local_dir: "data".into(),
            request_timeout_secs: 0,
        };
        let labels: Vec<String> = default_sources(&config)
            .unwrap()
            .iter()
            .map(|s| s.label())
            .collect();
        assert_eq!(labels.len(), 3);
        assert!(labels[0].starts_with("query endpoint"));
        assert!(labels[2].contains("/dashboard/"));
    }

    #[tokio::test]
    async fn test_fetch_checks_status_and_content_type() {
        let app = Router::new()
            .route(
                "/data/yoy.json",
                get(|| async { ([(header::CONTENT_TYPE, "application/json")], "[]") }),
            )
            .route(
                "/data/produtos.json",
                get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<html></html>") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let s = source(Strategy::AbsoluteStatic, &format!("http://{addr}"));
        assert_eq!(s.fetch(DatasetName::Yoy).await.unwrap(), b"[]".to_vec());
        assert!(matches!(
            s.fetch(DatasetName::Products).await,
            Err(FetchError::ContentType { .. })
        ));
        assert!(matches!(
            s.fetch(DatasetName::Calendar).await,
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_content_type_falls_back_to_body_check() {
        let app = Router::new()
            .route(
                "/data/calendario.json",
                get(|| async { Response::new(Body::from("[{\"Data\": \"2026-03-01\"}]")) }),
            )
            .route(
                "/data/erosao.json",
                get(|| async { Response::new(Body::from("42")) }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let s = source(Strategy::AbsoluteStatic, &format!("http://{addr}"));
        let calendar = s.fetch(DatasetName::Calendar).await.unwrap();
        assert!(parse_container(&calendar).unwrap().is_array());

        let erosion = s.fetch(DatasetName::Erosion).await.unwrap();
        assert!(matches!(parse_container(&erosion), Err(FetchError::NotAContainer)));
    }
}

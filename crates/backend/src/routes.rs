use std::path::Path;

use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::handlers;
use crate::shared::state::SharedState;
use crate::system::middleware::request_logger::request_logger;

/// All application routes
pub fn configure_routes(state: SharedState, data_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // DATASETS
        // ========================================
        .route("/api/data", get(handlers::data::get_data_file))
        .route("/api/data/reload", post(handlers::data::reload))
        .route("/api/data/status", get(handlers::data::get_status))
        .nest_service("/data", ServeDir::new(data_dir))
        // ========================================
        // SETTINGS
        // ========================================
        .route(
            "/api/settings/fixed_cost",
            get(handlers::settings::get_fixed_cost).put(handlers::settings::put_fixed_cost),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/d410/executive_summary",
            get(handlers::d410_executive_summary::get_executive_summary),
        )
        .route("/api/d411/pricing", get(handlers::d411_pricing::get_pricing))
        .route(
            "/api/d412/product_map",
            get(handlers::d412_product_map::get_product_map),
        )
        .route(
            "/api/d413/revenue_diagnosis",
            get(handlers::d413_revenue_diagnosis::get_revenue_diagnosis),
        )
        .route(
            "/api/d414/seasonality",
            get(handlers::d414_seasonality::get_seasonality),
        )
        .route("/api/d415/outlook", get(handlers::d415_outlook::get_outlook))
        // ========================================
        // INDICATORS
        // ========================================
        .route(
            "/api/indicators/meta",
            get(handlers::indicators::get_indicator_catalog),
        )
        .route(
            "/api/indicators/compute",
            post(handlers::indicators::compute_indicators),
        )
        // ========================================
        // U510 UPLOAD STAGING
        // ========================================
        .route("/api/u510/upload", post(handlers::u510_upload_staging::upload))
        .route(
            "/api/u510/upload_csv",
            post(handlers::u510_upload_staging::upload_csv),
        )
        .route(
            "/api/u510/upload_file",
            post(handlers::u510_upload_staging::upload_file),
        )
        .route(
            "/api/u510/uploads",
            get(handlers::u510_upload_staging::list_uploads),
        )
        .with_state(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::shared::config::Config;
    use crate::shared::state::test_support::StaticSource;
    use crate::shared::state::AppState;

    fn app(broken: bool) -> (Router, SharedState) {
        let state = Arc::new(AppState::new(
            Config::default(),
            vec![Box::new(StaticSource { broken })],
        ));
        (configure_routes(state.clone(), Path::new("data")), state)
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_default())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_dashboards_unavailable_until_loaded() {
        let (router, state) = app(false);
        let (status, _) = call(router.clone(), "GET", "/api/d410/executive_summary", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        state.reload().await.unwrap();
        for uri in [
            "/api/d410/executive_summary?fixed_cost=1000",
            "/api/d411/pricing",
            "/api/d412/product_map",
            "/api/d413/revenue_diagnosis",
            "/api/d414/seasonality",
            "/api/d415/outlook",
        ] {
            let (status, _) = call(router.clone(), "GET", uri, None).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_failed_reload_is_503_with_message() {
        let (router, _) = app(true);
        let (status, body) = call(router, "POST", "/api/data/reload", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("error"));
    }

    #[tokio::test]
    async fn test_fixed_cost_setting() {
        let (router, state) = app(false);
        let (status, _) = call(router.clone(), "PUT", "/api/settings/fixed_cost", Some(r#"{"fixed_cost": 0}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.fixed_cost().await.value(), 16913.46);

        let (status, body) =
            call(router.clone(), "PUT", "/api/settings/fixed_cost", Some(r#"{"fixed_cost": 12000}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("12000"));
        let (_, body) = call(router, "GET", "/api/settings/fixed_cost", None).await;
        assert!(body.contains("12000"));
    }

    #[tokio::test]
    async fn test_data_endpoint_rejects_bad_names() {
        let (router, _) = app(false);
        let (status, body) = call(router, "GET", "/api/data?file=..%2Fsecret", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid file name"));
    }
}

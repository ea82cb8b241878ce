//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Browser lists
        .route("/api/v1/browsers/:category", get(handlers::list_browsers))
        .route("/api/v1/browsers/:category/refresh", post(handlers::refresh_browsers))
        .route("/api/v1/browsers/:category/:key", get(handlers::get_browser))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    use ondemand_cache::{BrowserFactory, FactoryConfig};
    use ondemand_core::error::{OnDemandError, Result};
    use ondemand_core::traits::PlatformSource;
    use ondemand_core::types::{Category, PlatformDescriptor};

    use crate::state::ApiConfig;

    #[derive(Default)]
    struct StaticSource {
        offline: AtomicBool,
    }

    #[async_trait]
    impl PlatformSource for StaticSource {
        async fn supported_platforms(&self, category: Category) -> Result<Vec<PlatformDescriptor>> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(OnDemandError::HttpError("connection refused".into()));
            }
            Ok(match category {
                Category::Appium => vec![
                    PlatformDescriptor::new("Safari", "iPhone Simulator", "9.0", "9.0", "Mac 10.10")
                        .with_device("iPhone", None),
                ],
                _ => vec![
                    PlatformDescriptor::new("chrome", "Google Chrome", "50", "50", "Windows 2012 R2"),
                    PlatformDescriptor::new("chrome", "Google Chrome", "48", "48", "Windows 2012 R2"),
                ],
            })
        }
    }

    async fn test_app_with(source: Arc<StaticSource>) -> Router {
        let factory = BrowserFactory::new_warmed(source, FactoryConfig::default()).await;
        let state = Arc::new(AppState::with_factory(ApiConfig::default(), factory));
        create_router(state)
    }

    async fn test_app() -> Router {
        test_app_with(Arc::new(StaticSource::default())).await
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, json) = get_json(test_app().await, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["cache"]["appium"], 2);
    }

    #[tokio::test]
    async fn test_list_browsers_sorted() {
        let (status, json) = get_json(test_app().await, "/api/v1/browsers/webdriver").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 2);
        assert_eq!(json["browsers"][0]["key"], "chrome48");
        assert_eq!(json["browsers"][1]["key"], "chrome50");
        assert_eq!(json["browsers"][0]["os"], "Windows 8.1");
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let (status, json) = get_json(test_app().await, "/api/v1/browsers/espresso").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_get_browser() {
        let (status, json) = get_json(test_app().await, "/api/v1/browsers/appium/iPhoneportraitSafari9_0").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["orientation"], "portrait");
        assert_eq!(json["label"], "iPhone Simulator 9.0 (portrait)");
    }

    #[tokio::test]
    async fn test_get_browser_latest() {
        let (status, json) = get_json(test_app().await, "/api/v1/browsers/classic/chrome48?latest=true").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["key"], "chrome50");
    }

    #[tokio::test]
    async fn test_get_browser_missing() {
        let (status, _) = get_json(test_app().await, "/api/v1/browsers/webdriver/opera12").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json(test_app().await, "/api/v1/browsers/webdriver/opera12?latest=true").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_refresh_reports_upstream_failure() {
        let source = Arc::new(StaticSource::default());
        let app = test_app_with(source.clone()).await;
        source.offline.store(true, Ordering::SeqCst);

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/browsers/webdriver/refresh")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");

        // The cached list survives the failed refresh
        let (status, json) = get_json(app, "/api/v1/browsers/webdriver").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 2);
    }

    #[tokio::test]
    async fn test_refresh() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/browsers/appium/refresh")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(test_app().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["category"], "appium");
        assert_eq!(json["count"], 2);
    }
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::OptimizerConfig;
use crate::http::handlers;
use crate::http::request::{UuidRequestId, request_id};
use crate::inventory::Dataset;
use crate::lifecycle::ShutdownSignal;
use crate::threshold::ThresholdSource;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Inventory, read-only for the life of the process.
    pub dataset: Arc<Dataset>,
    pub threshold: Arc<dyn ThresholdSource>,
    /// Status sent with error payloads.
    pub error_status: StatusCode,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, threshold: Arc<dyn ThresholdSource>) -> Self {
        Self {
            dataset,
            threshold,
            error_status: StatusCode::OK,
        }
    }

    pub fn with_error_status(mut self, status: StatusCode) -> Self {
        self.error_status = status;
        self
    }
}

/// HTTP server for the optimizer.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: &OptimizerConfig, state: AppState) -> Self {
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &OptimizerConfig, state: AppState) -> Router {
        Router::new()
            .route(
                &config.api.path,
                get(handlers::inefficient_groups).fallback(handlers::method_not_allowed),
            )
            .route("/healthz", get(handlers::healthz))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The assembled router, for driving the service without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::http::{HeaderMap, Method, header};
    use tower::ServiceExt;

    use crate::error::ConfigurationError;
    use crate::inventory::{DatasetLoader, SampleLoader};
    use crate::threshold::parse_threshold;

    /// Threshold source returning a fixed raw value and counting calls.
    struct FixedValue {
        raw: &'static str,
        calls: AtomicUsize,
    }

    impl FixedValue {
        fn new(raw: &'static str) -> Arc<Self> {
            Arc::new(Self {
                raw,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl ThresholdSource for FixedValue {
        fn resolve(&self) -> Result<i64, ConfigurationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            parse_threshold("X", self.raw)
        }
    }

    fn router(source: Arc<FixedValue>, error_status: StatusCode) -> Router {
        let dataset = Arc::new(SampleLoader.load().unwrap());
        let state = AppState::new(dataset, source).with_error_status(error_status);
        HttpServer::new(&OptimizerConfig::default(), state).into_router()
    }

    async fn send(router: Router, method: Method, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_query_returns_inefficient_groups() {
        let source = FixedValue::new("1");
        let (status, headers, body) =
            send(router(source.clone(), StatusCode::OK), Method::GET, "/mta-hosting-optimizer").await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers.contains_key("x-request-id"));
        let names: Vec<String> = serde_json::from_slice(&body).unwrap();
        assert_eq!(names, vec!["mta-prod-1", "mta-prod-3"]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_negative_threshold_returns_empty_array() {
        let (status, _, body) =
            send(router(FixedValue::new("-1"), StatusCode::OK), Method::GET, "/mta-hosting-optimizer").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_invalid_threshold_returns_error_payload() {
        let (status, _, body) = send(
            router(FixedValue::new("invalid"), StatusCode::OK),
            Method::GET,
            "/mta-hosting-optimizer",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["result"].is_null());
        assert_eq!(json["status"], "Error");
        assert_eq!(json["error"]["kind"], "threshold_not_integer");
        assert!(!json["error"]["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_configurable() {
        let (status, _, _) = send(
            router(FixedValue::new("invalid"), StatusCode::INTERNAL_SERVER_ERROR),
            Method::GET,
            "/mta-hosting-optimizer",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_other_methods_do_not_resolve_threshold() {
        let source = FixedValue::new("2");
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let (status, _, body) =
                send(router(source.clone(), StatusCode::OK), method, "/mta-hosting-optimizer").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert!(body.is_empty());
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_method_not_allowed_lists_get() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/mta-hosting-optimizer")
            .body(Body::empty())
            .unwrap();
        let response = router(FixedValue::new("1"), StatusCode::OK)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.headers()[header::ALLOW], "GET,HEAD");
    }

    #[tokio::test]
    async fn test_healthz() {
        let (status, _, body) =
            send(router(FixedValue::new("1"), StatusCode::OK), Method::GET, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let request = Request::builder()
            .uri("/healthz")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let response = router(FixedValue::new("1"), StatusCode::OK)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (status, _, _) =
            send(router(FixedValue::new("1"), StatusCode::OK), Method::GET, "/other").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock collaborators injected, enabling end-to-end testing of the
//! dashboard API without a running order backend.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use orderdesk_core::{
    config::{BackendConfig, ExportConfig, ServerConfig, TableConfig},
    testing::{MockDownloadResolver, MockFileRetriever, MockOrderSource, MockStateChangeSubmitter},
    Config, OrderDashboard, Row,
};
use orderdesk_server::state::{AppState, Collaborators};

/// Re-export fixtures for test convenience
pub use orderdesk_core::testing::fixtures;

/// Test fixture for API testing with mock collaborators.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_listing() {
///     let fixture = TestFixture::with_rows(fixtures::numbered_orders(3)).await;
///
///     let response = fixture.get("/api/v1/orders").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state, for inspecting the dashboard directly
    pub state: Arc<AppState>,
    /// Mock order source - configure the rows returned on reload
    pub orders: MockOrderSource,
    /// Mock submitter - script redesign responses
    pub submitter: MockStateChangeSubmitter,
    /// Mock resolver - script export paths
    pub resolver: MockDownloadResolver,
    /// Mock retriever - inspect triggered downloads
    pub retriever: MockFileRetriever,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with no orders loaded.
    pub async fn new() -> Self {
        Self::with_rows(Vec::new()).await
    }

    /// Create a fixture and load `rows` through the mock order source.
    pub async fn with_rows(rows: Vec<Row>) -> Self {
        let orders = MockOrderSource::with_rows(rows);
        let submitter = MockStateChangeSubmitter::new();
        let resolver = MockDownloadResolver::new();
        let retriever = MockFileRetriever::new();

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            backend: BackendConfig {
                url: "http://orders.test/api".to_string(),
                api_key: Some("test-key".to_string()),
                timeout_secs: 5,
            },
            table: TableConfig::default(),
            export: ExportConfig::default(),
        };

        let dashboard =
            OrderDashboard::orders(&config.table).expect("Failed to create dashboard");

        let collaborators = Collaborators {
            orders: Arc::new(orders.clone()),
            submitter: Arc::new(submitter.clone()),
            resolver: Arc::new(resolver.clone()),
            retriever: Arc::new(retriever.clone()),
        };

        let state = Arc::new(AppState::new(config, dashboard, collaborators));
        state.reload().await.expect("Initial reload failed");

        let router = orderdesk_server::api::create_router(Arc::clone(&state));

        Self {
            router,
            state,
            orders,
            submitter,
            resolver,
            retriever,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}

//! Router driver for the integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use insight_cache::{FnSource, SourceError, ValueSource};
use insight_server::AppState;
use serde_json::Value;
use tower::ServiceExt;

use super::chain::MockChain;

/// Sends requests straight into a `Router` without binding a socket.
pub struct TestClient {
    app: Router,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    /// GET `uri` with no extra headers.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.get_with_headers(uri, vec![]).await
    }

    /// GET `uri` with the given headers.
    pub async fn get_with_headers(&self, uri: &str, headers: Vec<(&str, &str)>) -> TestResponse {
        let request = headers
            .into_iter()
            .fold(Request::get(uri), |builder, (name, value)| {
                builder.header(name, value)
            })
            .body(Body::empty())
            .expect("invalid test request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("body could not be read")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Status, headers and buffered body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, self.text()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(self.status, expected, "unexpected status, body: {}", self.text());
        self
    }

    /// Asserts the status and returns the JSON body.
    pub fn expect_json(&self, expected: StatusCode) -> Value {
        self.assert_status(expected);
        self.json()
    }

    pub fn assert_header_exists(&self, name: &str) -> &Self {
        assert!(self.header(name).is_some(), "missing header '{}'", name);
        self
    }

    pub fn assert_header(&self, name: &str, expected: &str) -> &Self {
        assert_eq!(self.header(name), Some(expected), "header '{}'", name);
        self
    }
}

/// State over `chain` with a ticker that always answers `rate`.
pub fn state_with(chain: MockChain, rate: f64) -> AppState {
    let ticker: Arc<dyn ValueSource<f64>> = Arc::new(FnSource::new("ticker", move || async move {
        Ok::<f64, SourceError>(rate)
    }));

    let currency = AppState::currency_rate(Duration::from_secs(600), ticker, 1.00).unwrap();
    AppState::new(Arc::new(chain), currency)
}

/// Client over a healthy node and a ticker answering 8.23.
pub fn client() -> TestClient {
    client_with(state_with(MockChain::healthy(), 8.23))
}

pub fn client_with(state: AppState) -> TestClient {
    TestClient::new(insight_server::create_app_router(state))
}

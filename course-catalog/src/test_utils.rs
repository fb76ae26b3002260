use crate::client::CatalogClient;
use crate::config::CatalogConfig;
use log::LevelFilter;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use wiremock::matchers;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test fixture with a mocked catalog API and a client pointed at it.
///
/// # Examples
///
/// ```rust
/// #[tokio::test]
/// async fn test_list() {
///     let fixture = TestFixture::new().await;
///     fixture
///         .add_api_mock(Method::GET, "/courses", json!([]), StatusCode::OK, 1)
///         .await;
///
///     let page = fixture.client.courses().list(ListQuery::new()).await.unwrap();
///     assert!(page.items.is_empty());
///     fixture.api_mock.verify().await;
/// }
/// ```
pub struct TestFixture {
    /// Client configured against the mock server
    pub client: CatalogClient,
    /// Configuration settings
    pub config: CatalogConfig,
    /// Mock server standing in for the catalog API
    pub api_mock: MockServer,
}

impl TestFixture {
    /// Creates a new fixture with a fresh mock server and an anonymous client.
    pub async fn new() -> Self {
        Self::setup_logger(LevelFilter::Debug);

        let api_mock = MockServer::start().await;
        let config = CatalogConfig::for_test_with_mock(&api_mock);
        let client = CatalogClient::new(config.clone()).expect("Failed to create test client");

        Self {
            client,
            config,
            api_mock,
        }
    }

    /// Initializes the test logger with the given level.
    ///
    /// Called by `TestFixture::new()`; only the first initialization in a test binary wins.
    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    /// Mounts a mock answering `method path` with a JSON body, expected `expected_calls` times.
    pub async fn add_api_mock(
        &self,
        method: Method,
        path: impl Into<String>,
        response_body: impl Serialize,
        status_code: StatusCode,
        expected_calls: u64,
    ) {
        Mock::given(matchers::method(method.as_str()))
            .and(matchers::path(path.into()))
            .respond_with(ResponseTemplate::new(status_code.as_u16()).set_body_json(response_body))
            .expect(expected_calls)
            .mount(&self.api_mock)
            .await;
    }

    /// Mounts a mock that rejects every request carrying pagination parameters the way
    /// a strict validation pipe does, unless a higher priority mock matches first.
    pub async fn reject_pagination_params(&self, path: impl Into<String>) {
        Mock::given(matchers::method("GET"))
            .and(matchers::path(path.into()))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "statusCode": 400,
                "message": ["property page should not exist"],
                "error": "Bad Request"
            })))
            .mount(&self.api_mock)
            .await;
    }

    /// Bodies of the requests the mock server received, in arrival order
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.api_mock
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Query strings of the requests the mock server received, in arrival order
    pub async fn received_queries(&self) -> Vec<Option<String>> {
        self.api_mock
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| r.url.query().map(str::to_string))
            .collect()
    }
}

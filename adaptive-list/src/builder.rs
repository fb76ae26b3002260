use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::client::ApiClient;
use crate::error::TransportError;
use crate::middleware::{BearerAuth, Middleware, TokenProvider, UnauthorizedHandler};

/// Marker types to track whether the base URL has been provided.
pub struct Missing;
pub struct Present;

/// A builder for configuring an [`ApiClient`].
/// The builder is generic over one type parameter:
/// - UrlSet: whether the base URL has been supplied.
pub struct ApiClientBuilder<UrlSet> {
    pub(crate) base_url: Option<Url>,
    pub(crate) timeout: Duration,
    pub(crate) connect_timeout: Duration,
    pub(crate) pool_max_idle_per_host: usize,
    pub(crate) headers: HeaderMap,
    pub(crate) middleware: Vec<Arc<dyn Middleware>>,
    _url: PhantomData<UrlSet>,
}

impl ApiClientBuilder<Missing> {
    /// Creates a new builder with no base URL and default timeouts.
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            pool_max_idle_per_host: 10,
            headers,
            middleware: Vec::new(),
            _url: PhantomData,
        }
    }

    /// Sets the base URL every endpoint path is resolved against.
    pub fn with_base_url(
        self,
        base_url: &str,
    ) -> Result<ApiClientBuilder<Present>, TransportError> {
        let base_url = Url::parse(base_url)?;
        Ok(ApiClientBuilder {
            base_url: Some(base_url),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            pool_max_idle_per_host: self.pool_max_idle_per_host,
            headers: self.headers,
            middleware: self.middleware,
            _url: PhantomData,
        })
    }
}

impl Default for ApiClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<UrlSet> ApiClientBuilder<UrlSet> {
    /// Sets the total timeout of a single request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Keep up to this many idle connections per host.
    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Adds a header sent with every request.
    pub fn add_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Appends a middleware to the chain.
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Wires a token provider in: bearer token on requests, `on_unauthorized` on 401.
    pub fn with_token_provider(self, provider: Arc<dyn TokenProvider>) -> Self {
        self.with_middleware(Arc::new(BearerAuth::new(provider.clone())))
            .with_middleware(Arc::new(UnauthorizedHandler::new(provider)))
    }
}

impl ApiClientBuilder<Present> {
    /// Builds the client.
    pub fn build(self) -> Result<ApiClient, TransportError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .default_headers(self.headers)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()?;

        // Base URL is always set in the Present state.
        let Some(base_url) = self.base_url else {
            return Err(TransportError::Url(url::ParseError::EmptyHost));
        };

        Ok(ApiClient {
            client,
            base_url,
            middleware: self.middleware,
        })
    }
}

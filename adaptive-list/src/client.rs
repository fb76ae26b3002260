use crate::error::TransportError;
use crate::middleware::Middleware;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// The HTTP seam used by the list fetcher
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a GET to `path` with the given query pairs and returns the JSON body.
    ///
    /// An empty `query` sends no query string at all.
    async fn get_json(&self, path: &str, query: &[(String, String)])
    -> Result<Value, TransportError>;
}

/// A reqwest-backed REST client with a fixed base URL and a middleware chain
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) middleware: Vec<Arc<dyn Middleware>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("middleware", &self.middleware.len())
            // Skip client as it doesn't carry anything useful to print
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL, keeping any base path prefix
    pub fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, TransportError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.strip_prefix('/').unwrap_or(path);
        let mut url = Url::parse(&format!("{}/{}", base, path))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Creates a request builder with the middleware chain applied
    pub fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
    ) -> Result<RequestBuilder, TransportError> {
        let url = self.url(path, query)?;
        debug!("{} {}", method, url);
        let request = self.client.request(method, url);
        Ok(self
            .middleware
            .iter()
            .fold(request, |request, m| m.on_request(request)))
    }

    /// Sends a request and returns the raw JSON body of a 2xx response
    pub async fn send_raw(&self, request: RequestBuilder) -> Result<Value, TransportError> {
        let response = request.send().await?;
        let status = response.status();
        for m in &self.middleware {
            m.on_response(status);
        }

        let text = response.text().await?;
        if !status.is_success() {
            return Err(TransportError::from_status(status, text));
        }
        if text.trim().is_empty() || status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Sends a request and deserializes the 2xx response
    pub async fn send<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<R, TransportError> {
        let body = self.send_raw(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Sends a GET request to the specified endpoint
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, TransportError> {
        self.send(self.request(Method::GET, path, &[])?).await
    }

    /// Sends a POST request with a JSON payload to the specified endpoint
    pub async fn post<T, R>(&self, path: &str, payload: &T) -> Result<R, TransportError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path, &[])?.json(payload))
            .await
    }

    /// Sends a PUT request with a JSON payload to the specified endpoint
    pub async fn put<T, R>(&self, path: &str, payload: &T) -> Result<R, TransportError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path, &[])?.json(payload))
            .await
    }

    /// Sends a PATCH request with a JSON payload to the specified endpoint
    pub async fn patch<T, R>(&self, path: &str, payload: &T) -> Result<R, TransportError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.request(Method::PATCH, path, &[])?.json(payload))
            .await
    }

    /// Sends a DELETE request to the specified endpoint, ignoring any response body
    pub async fn delete(&self, path: &str) -> Result<(), TransportError> {
        self.send_raw(self.request(Method::DELETE, path, &[])?)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, TransportError> {
        self.send_raw(self.request(Method::GET, path, query)?).await
    }
}

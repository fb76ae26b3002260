use log::{debug, warn};
use reqwest::{RequestBuilder, StatusCode};
use std::sync::Arc;

/// Source of the bearer token attached to outgoing requests
pub trait TokenProvider: Send + Sync {
    /// The current token, if the user is signed in
    fn token(&self) -> Option<String>;

    /// Called when the backend answers 401
    fn on_unauthorized(&self) {}
}

/// A request/response hook applied by [`crate::ApiClient`] around every exchange.
///
/// Middlewares run in the order they were registered.
pub trait Middleware: Send + Sync {
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }

    fn on_response(&self, _status: StatusCode) {}
}

/// Attaches `Authorization: Bearer <token>` when the provider has a token
#[derive(Clone)]
pub struct BearerAuth {
    provider: Arc<dyn TokenProvider>,
}

impl BearerAuth {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }
}

impl Middleware for BearerAuth {
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self.provider.token() {
            Some(token) => request.bearer_auth(token),
            None => {
                debug!("No token available, sending request without authorization");
                request
            }
        }
    }
}

/// Notifies the token provider when the backend rejects our credentials
#[derive(Clone)]
pub struct UnauthorizedHandler {
    provider: Arc<dyn TokenProvider>,
}

impl UnauthorizedHandler {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }
}

impl Middleware for UnauthorizedHandler {
    fn on_response(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            warn!("Backend answered 401 Unauthorized, notifying token provider");
            self.provider.on_unauthorized();
        }
    }
}

use crate::permissions::{Permission, Role};
use adaptive_list::{ListFetchError, TransportError};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to list resources: {0}")]
    Fetch(#[from] ListFetchError),
    #[error("Catalog request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("Failed to decode {resource}: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Role {role} is not allowed to {permission:?}")]
    Forbidden { role: Role, permission: Permission },
    #[error("{resource} can't be modified through the API")]
    ReadOnly { resource: &'static str },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CatalogError::Fetch(e) => e.status(),
            CatalogError::Transport(e) => e.status(),
            CatalogError::Forbidden { .. } | CatalogError::ReadOnly { .. } => {
                Some(StatusCode::FORBIDDEN)
            }
            CatalogError::Decode { .. } | CatalogError::Config(_) => None,
        }
    }
}

/// A failure rendered for display: a human-readable detail plus the HTTP status when there is one
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub detail: String,
    pub status_code: Option<StatusCode>,
}

impl ApiError {
    /// Create a new ApiError with a detail message and status code
    pub fn new<S: ToString>(detail: S, status_code: Option<StatusCode>) -> Self {
        Self {
            detail: detail.to_string(),
            status_code,
        }
    }

    /// Create new error without a status (network, decoding, local failures)
    pub fn local<S: ToString>(detail: S) -> Self {
        Self::new(detail, None)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(status) => write!(f, "{} ({})", self.detail, status.as_u16()),
            None => f.write_str(&self.detail),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Request(ref e) if e.is_timeout() => {
                ApiError::local("The server took too long to respond")
            }
            TransportError::Request(_) => ApiError::local("Could not reach the server"),
            TransportError::Decode(_) => ApiError::local("The server sent an unexpected response"),
            TransportError::Url(e) => ApiError::local(format!("Invalid API address: {}", e)),
            TransportError::Status { status, .. } if status == StatusCode::UNAUTHORIZED => {
                ApiError::new("Your session has expired, please sign in again", Some(status))
            }
            status_err @ TransportError::Status { .. } => {
                let status = status_err.status();
                ApiError::new(status_err.message(), status)
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Fetch(ListFetchError::Terminal { source, .. }) => source.into(),
            CatalogError::Fetch(ListFetchError::Cancelled { .. }) => {
                ApiError::local("The request was cancelled")
            }
            CatalogError::Transport(e) => e.into(),
            CatalogError::Decode { resource, .. } => {
                ApiError::local(format!("The server sent malformed {} data", resource))
            }
            CatalogError::Forbidden { .. } => ApiError::new(
                "You don't have permission to perform this action",
                Some(StatusCode::FORBIDDEN),
            ),
            CatalogError::ReadOnly { resource } => ApiError::new(
                format!("The {} list is read-only", resource),
                Some(StatusCode::FORBIDDEN),
            ),
            CatalogError::Config(e) => ApiError::local(format!("Configuration error: {}", e)),
        }
    }
}

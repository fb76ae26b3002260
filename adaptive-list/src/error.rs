use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by a single HTTP exchange with the backend
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed with status {status}: {text}")]
    Status {
        status: StatusCode,
        /// The response body, when it parsed as JSON
        body: Option<Value>,
        /// The raw response body
        text: String,
    },

    #[error("Failed to send request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to deserialize response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl TransportError {
    /// Builds a status error from a raw response body, keeping the parsed JSON if any
    pub fn from_status(status: StatusCode, text: String) -> Self {
        let body = serde_json::from_str(&text).ok();
        Self::Status { status, body, text }
    }

    /// The HTTP status code, if the backend answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
            Self::Decode(_) | Self::Url(_) => None,
        }
    }

    /// The parsed error body of a non-2xx response
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// A human-readable message for display.
    ///
    /// Prefers the backend's `message` field (string or array of strings),
    /// then a bare array of strings, then the status reason.
    pub fn message(&self) -> String {
        match self {
            Self::Status { status, body, .. } => body
                .as_ref()
                .and_then(message_from_body)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or_else(|| status.to_string())
                }),
            other => other.to_string(),
        }
    }
}

fn message_from_body(body: &Value) -> Option<String> {
    let messages = match body {
        Value::Array(_) => body,
        Value::Object(obj) => obj.get("message")?,
        _ => return None,
    };
    match messages {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

/// Error returned by the adaptive list fetch once it gives up
#[derive(Error, Debug)]
pub enum ListFetchError {
    #[error("List fetch failed after {attempts} attempt(s): {source}")]
    Terminal {
        attempts: usize,
        #[source]
        source: TransportError,
    },

    #[error("List fetch cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: usize },
}

impl ListFetchError {
    /// Number of requests issued before giving up
    pub fn attempts(&self) -> usize {
        match self {
            Self::Terminal { attempts, .. } | Self::Cancelled { attempts } => *attempts,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Terminal { source, .. } => source.status(),
            Self::Cancelled { .. } => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Terminal { source, .. } => source.message(),
            Self::Cancelled { .. } => self.to_string(),
        }
    }

    /// The underlying transport error of the last attempt
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Terminal { source, .. } => Some(source),
            Self::Cancelled { .. } => None,
        }
    }
}

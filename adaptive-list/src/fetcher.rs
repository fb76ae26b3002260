use crate::client::Transport;
use crate::envelope::{ListEnvelope, ListFetchOutcome, Pagination};
use crate::error::{ListFetchError, TransportError};
use crate::intent::ListRequestIntent;
use crate::shape::QueryShape;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

static UNKNOWN_PAGINATION_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)property (page|limit) should not exist").expect("valid pattern")
});

/// Whether a failed attempt was rejected only because the backend doesn't know our
/// pagination parameter names.
///
/// The error body must be an array of strings (bare, or under `message` as the
/// validation pipe sends it) with at least one entry matching
/// `property (page|limit) should not exist`, case-insensitively. Any other body,
/// including a missing or malformed one, is not a rejection.
pub fn is_unknown_pagination_param_error(err: &TransportError) -> bool {
    let Some(body) = err.body() else {
        return false;
    };
    let messages = match body {
        Value::Array(messages) => messages,
        Value::Object(obj) => match obj.get("message") {
            Some(Value::Array(messages)) => messages,
            _ => return false,
        },
        _ => return false,
    };
    messages
        .iter()
        .filter_map(Value::as_str)
        .any(|m| UNKNOWN_PAGINATION_PARAM.is_match(m))
}

/// Fetches one page of a collection from a backend whose pagination dialect isn't
/// known up front.
///
/// Each call tries [`QueryShape::ALL`] strictly in order, one request at a time,
/// and stops at the first success or the first error that isn't a shape rejection.
#[derive(Clone)]
pub struct AdaptiveListFetcher {
    transport: Arc<dyn Transport>,
}

impl AdaptiveListFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch_list(
        &self,
        intent: ListRequestIntent,
    ) -> Result<ListFetchOutcome, ListFetchError> {
        self.fetch_list_with_cancel(intent, &CancellationToken::new())
            .await
    }

    /// Same as [`Self::fetch_list`], giving up as soon as `cancel` fires.
    ///
    /// The token is checked before every attempt and raced against the request in flight.
    pub async fn fetch_list_with_cancel(
        &self,
        intent: ListRequestIntent,
        cancel: &CancellationToken,
    ) -> Result<ListFetchOutcome, ListFetchError> {
        // Only the last shape's rejection is terminal
        let [fallbacks @ .., last] = QueryShape::ALL;
        let fallback_count = fallbacks.len();

        for (attempt, shape) in fallbacks.into_iter().enumerate() {
            match self.attempt(&intent, shape, attempt, cancel).await? {
                Ok(outcome) => return Ok(outcome),
                Err(err) if is_unknown_pagination_param_error(&err) => {
                    debug!(
                        "Backend rejected the {} shape for {}: {}",
                        shape,
                        intent.resource_path(),
                        err.message()
                    );
                }
                Err(err) => {
                    return Err(ListFetchError::Terminal {
                        attempts: attempt + 1,
                        source: err,
                    });
                }
            }
        }

        self.attempt(&intent, last, fallback_count, cancel)
            .await?
            .map_err(|source| ListFetchError::Terminal {
                attempts: fallback_count + 1,
                source,
            })
    }

    /// Sends one attempt with `shape`. The outer error is cancellation, the inner one the
    /// transport failure the caller classifies.
    async fn attempt(
        &self,
        intent: &ListRequestIntent,
        shape: QueryShape,
        attempt: usize,
        cancel: &CancellationToken,
    ) -> Result<Result<ListFetchOutcome, TransportError>, ListFetchError> {
        if cancel.is_cancelled() {
            return Err(ListFetchError::Cancelled { attempts: attempt });
        }

        let query = shape.query_pairs(intent);
        debug!(
            "Listing {} with {} shape (attempt {})",
            intent.resource_path(),
            shape,
            attempt + 1
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(ListFetchError::Cancelled { attempts: attempt + 1 });
            }
            result = self.transport.get_json(intent.resource_path(), &query) => result,
        };
        Ok(result.map(|body| normalize(body, intent, shape)))
    }
}

fn normalize(body: Value, intent: &ListRequestIntent, shape: QueryShape) -> ListFetchOutcome {
    let (items, meta) = ListEnvelope::decode(body, intent.envelope_key()).into_parts();
    let pagination = Pagination::normalize(
        meta.as_ref(),
        items.len(),
        intent.page(),
        intent.limit(),
    );
    ListFetchOutcome {
        items,
        pagination,
        shape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted responses and records every request it sees
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<Value, TransportError>>>,
        requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
        cancel_after_reply: Option<CancellationToken>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<Value, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
                cancel_after_reply: None,
            })
        }

        /// Fires `cancel` once the first scripted reply has been handed out
        fn cancelling(
            responses: Vec<Result<Value, TransportError>>,
            cancel: CancellationToken,
        ) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
                cancel_after_reply: Some(cancel),
            })
        }

        fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn get_json(
            &self,
            path: &str,
            query: &[(String, String)],
        ) -> Result<Value, TransportError> {
            self.requests
                .lock()
                .unwrap()
                .push((path.to_string(), query.to_vec()));
            let reply = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra request");
            if let Some(cancel) = &self.cancel_after_reply {
                cancel.cancel();
            }
            reply
        }
    }

    fn rejected(param: &str) -> Result<Value, TransportError> {
        Err(status_error(
            StatusCode::BAD_REQUEST,
            json!({
                "statusCode": 400,
                "message": [format!("property {} should not exist", param)],
                "error": "Bad Request"
            }),
        ))
    }

    fn status_error(status: StatusCode, body: Value) -> TransportError {
        TransportError::from_status(status, body.to_string())
    }

    fn keys(query: &[(String, String)]) -> Vec<&str> {
        query.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_rejection_predicate() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            json!(["property page should not exist"]),
        );
        assert!(is_unknown_pagination_param_error(&err));

        let err = status_error(
            StatusCode::BAD_REQUEST,
            json!({"message": ["name must be a string", "Property LIMIT Should Not Exist"]}),
        );
        assert!(is_unknown_pagination_param_error(&err));
    }

    #[test]
    fn test_rejection_predicate_ignores_other_bodies() {
        // Single message string instead of an array
        let err = status_error(
            StatusCode::BAD_REQUEST,
            json!({"message": "property page should not exist"}),
        );
        assert!(!is_unknown_pagination_param_error(&err));

        let err = status_error(
            StatusCode::BAD_REQUEST,
            json!({"message": ["property search should not exist"]}),
        );
        assert!(!is_unknown_pagination_param_error(&err));

        let err = TransportError::from_status(StatusCode::BAD_REQUEST, "not json".into());
        assert!(!is_unknown_pagination_param_error(&err));

        let err = status_error(StatusCode::BAD_REQUEST, json!([1, 2, 3]));
        assert!(!is_unknown_pagination_param_error(&err));
    }

    #[tokio::test]
    async fn test_first_shape_success_sends_one_request() {
        let transport = ScriptedTransport::new(vec![Ok(json!([{"id": 1}, {"id": 2}]))]);
        let fetcher = AdaptiveListFetcher::new(transport.clone());

        let outcome = fetcher
            .fetch_list(ListRequestIntent::new("/courses").with_limit(10))
            .await
            .expect("Failed to fetch list");

        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.shape, QueryShape::Bare);
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "/courses");
        assert!(requests[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_falls_back_through_shapes_in_order() {
        let transport = ScriptedTransport::new(vec![
            rejected("page"),
            rejected("limit"),
            Ok(json!({"subscriptions": [{"id": 1}], "total": 31})),
        ]);
        let fetcher = AdaptiveListFetcher::new(transport.clone());

        let outcome = fetcher
            .fetch_list(
                ListRequestIntent::new("/subscriptions")
                    .with_page(2)
                    .with_limit(10),
            )
            .await
            .expect("Failed to fetch list");

        assert_eq!(outcome.shape, QueryShape::SkipTake);
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.pagination.total_items, 31);
        assert_eq!(outcome.pagination.total_pages, 4);
        assert_eq!(outcome.pagination.current_page, 2);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[0].1.is_empty());
        assert_eq!(keys(&requests[1].1), vec!["pageNumber", "pageSize"]);
        assert_eq!(keys(&requests[2].1), vec!["skip", "take"]);
        assert_eq!(requests[2].1[0].1, "10");
    }

    #[tokio::test]
    async fn test_unrelated_error_is_terminal() {
        let transport = ScriptedTransport::new(vec![Err(status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"message": "boom"}),
        ))]);
        let fetcher = AdaptiveListFetcher::new(transport.clone());

        let err = fetcher
            .fetch_list(ListRequestIntent::new("/courses"))
            .await
            .expect_err("Expected terminal error");

        assert_eq!(err.attempts(), 1);
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.message(), "boom");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_terminal_error_on_second_shape_stops() {
        let transport = ScriptedTransport::new(vec![
            rejected("page"),
            Err(status_error(StatusCode::FORBIDDEN, json!({"message": "Forbidden"}))),
        ]);
        let fetcher = AdaptiveListFetcher::new(transport.clone());

        let err = fetcher
            .fetch_list(ListRequestIntent::new("/courses"))
            .await
            .expect_err("Expected terminal error");

        assert_eq!(err.attempts(), 2);
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_surfaces_last_error() {
        let transport = ScriptedTransport::new(vec![
            rejected("page"),
            rejected("page"),
            rejected("limit"),
        ]);
        let fetcher = AdaptiveListFetcher::new(transport.clone());

        let err = fetcher
            .fetch_list(ListRequestIntent::new("/courses"))
            .await
            .expect_err("Expected exhaustion");

        assert_eq!(err.attempts(), 3);
        assert_eq!(err.message(), "property limit should not exist");
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_attempt() {
        let transport = ScriptedTransport::new(vec![]);
        let fetcher = AdaptiveListFetcher::new(transport.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = fetcher
            .fetch_list_with_cancel(ListRequestIntent::new("/courses"), &cancel)
            .await
            .expect_err("Expected cancellation");

        assert!(matches!(err, ListFetchError::Cancelled { attempts: 0 }));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_between_attempts() {
        let cancel = CancellationToken::new();
        let transport = ScriptedTransport::cancelling(
            vec![rejected("page"), Ok(json!([{"id": 1}]))],
            cancel.clone(),
        );
        let fetcher = AdaptiveListFetcher::new(transport.clone());

        let err = fetcher
            .fetch_list_with_cancel(ListRequestIntent::new("/courses"), &cancel)
            .await
            .expect_err("Expected cancellation");

        assert!(matches!(err, ListFetchError::Cancelled { attempts: 1 }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_body_yields_empty_items() {
        let transport = ScriptedTransport::new(vec![Ok(json!({"ok": true}))]);
        let fetcher = AdaptiveListFetcher::new(transport);

        let outcome = fetcher
            .fetch_list(ListRequestIntent::new("/courses"))
            .await
            .expect("Failed to fetch list");

        assert!(outcome.items.is_empty());
        assert_eq!(outcome.pagination.total_items, 0);
        assert_eq!(outcome.pagination.total_pages, 1);
    }
}

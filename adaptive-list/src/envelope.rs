use crate::shape::QueryShape;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The ways a backend packages a list response
#[derive(Debug, Clone, PartialEq)]
pub enum ListEnvelope {
    /// The body is the array itself
    BareArray(Vec<Value>),
    /// An object carrying the items under the resource's plural key
    /// (`courses`, `subscriptions`, ...)
    Keyed {
        items: Vec<Value>,
        meta: Map<String, Value>,
    },
    /// An object carrying the items under `data`
    Data {
        items: Vec<Value>,
        meta: Map<String, Value>,
    },
    /// Anything else, normalized to an empty list
    Unrecognized(Value),
}

impl ListEnvelope {
    /// Classifies a successful response body, checking the envelope shapes in priority order
    pub fn decode(body: Value, envelope_key: &str) -> Self {
        match body {
            Value::Array(items) => ListEnvelope::BareArray(items),
            Value::Object(mut obj) => {
                if matches!(obj.get(envelope_key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = obj.remove(envelope_key) {
                        return ListEnvelope::Keyed { items, meta: obj };
                    }
                }
                if matches!(obj.get("data"), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = obj.remove("data") {
                        return ListEnvelope::Data { items, meta: obj };
                    }
                }
                ListEnvelope::Unrecognized(Value::Object(obj))
            }
            other => ListEnvelope::Unrecognized(other),
        }
    }

    /// Splits the envelope into its items and whatever metadata sat next to them
    pub fn into_parts(self) -> (Vec<Value>, Option<Map<String, Value>>) {
        match self {
            ListEnvelope::BareArray(items) => (items, None),
            ListEnvelope::Keyed { items, meta } | ListEnvelope::Data { items, meta } => {
                (items, Some(meta))
            }
            ListEnvelope::Unrecognized(Value::Object(meta)) => (Vec::new(), Some(meta)),
            ListEnvelope::Unrecognized(_) => (Vec::new(), None),
        }
    }
}

/// Normalized pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u32,
}

impl Pagination {
    /// Synthesizes pagination from server metadata, falling back to the item count.
    ///
    /// `currentPage` and `itemsPerPage` always echo the request.
    pub fn normalize(
        meta: Option<&Map<String, Value>>,
        item_count: usize,
        page: u32,
        limit: u32,
    ) -> Self {
        let nested = meta
            .and_then(|m| m.get("pagination"))
            .and_then(Value::as_object);

        let total_items = nested
            .and_then(|p| count_field(p, "totalItems"))
            .or_else(|| meta.and_then(|m| count_field(m, "totalItems")))
            .or_else(|| meta.and_then(|m| count_field(m, "total")))
            .unwrap_or(item_count as u64);

        let total_pages = nested
            .and_then(|p| count_field(p, "totalPages"))
            .or_else(|| meta.and_then(|m| count_field(m, "totalPages")))
            .unwrap_or_else(|| {
                if limit > 0 {
                    total_items.div_ceil(u64::from(limit)).max(1)
                } else {
                    1
                }
            });

        Self {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
        }
    }
}

/// Reads a non-negative count.
///
/// Fields that are missing, null, negative or not numbers count as absent.
fn count_field(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    let value = obj.get(key)?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64)
    })
}

/// The uniform result of a list fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFetchOutcome {
    /// Raw resource objects in server order
    pub items: Vec<Value>,
    pub pagination: Pagination,
    /// The query shape the backend accepted
    pub shape: QueryShape,
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default number of items per page when the caller doesn't ask for one
pub const DEFAULT_LIMIT: u32 = 10;

/// Default upper bound on the page size
pub const DEFAULT_MAX_LIMIT: u32 = 100;

/// A filter value sent as a query parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Number(i64),
    /// Fractional bound, e.g. a price
    Decimal(f64),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Decimal(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Decimal(value)
    }
}

/// What page of a collection the caller wants, independent of how it gets encoded on the wire.
///
/// Built per call and consumed by [`crate::AdaptiveListFetcher::fetch_list`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequestIntent {
    resource_path: String,
    envelope_key: String,
    page: u32,
    limit: u32,
    max_limit: u32,
    filters: BTreeMap<String, FilterValue>,
}

impl ListRequestIntent {
    /// Creates an intent for the first page of `resource_path` with the default limit.
    ///
    /// The envelope key defaults to the last path segment (`/admin/courses` -> `courses`).
    pub fn new(resource_path: impl Into<String>) -> Self {
        let resource_path = resource_path.into();
        let envelope_key = resource_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            resource_path,
            envelope_key,
            page: 1,
            limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            filters: BTreeMap::new(),
        }
    }

    /// Sets the requested page, pages start at 1
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the requested page size; [`Self::limit`] clamps it to `[1, max_limit]`
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the resource-specific page size cap
    pub fn with_max_limit(mut self, max_limit: u32) -> Self {
        self.max_limit = max_limit.max(1);
        self
    }

    /// Overrides the plural array key looked up in enveloped responses
    pub fn with_envelope_key(mut self, key: impl Into<String>) -> Self {
        self.envelope_key = key.into();
        self
    }

    /// Adds a filter sent unchanged with every attempt
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn with_filters<I, K, V>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FilterValue>,
    {
        self.filters
            .extend(filters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    pub fn envelope_key(&self) -> &str {
        &self.envelope_key
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size actually sent, the requested one clamped to `[1, max_limit]`
    pub fn limit(&self) -> u32 {
        self.limit.clamp(1, self.max_limit)
    }

    pub fn max_limit(&self) -> u32 {
        self.max_limit
    }

    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }
}

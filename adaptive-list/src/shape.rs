use crate::intent::ListRequestIntent;
use log::warn;
use serde::Serialize;
use std::fmt;

/// One way of encoding pagination as query parameters.
///
/// The fetcher tries the shapes in the order of [`QueryShape::ALL`]; that order
/// decides which backend dialect is detected fastest and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryShape {
    /// Filters only, no pagination parameters
    Bare,
    /// `pageNumber` + `pageSize`
    PageNumber,
    /// Offset based `skip` + `take`
    SkipTake,
}

impl QueryShape {
    pub const ALL: [QueryShape; 3] = [
        QueryShape::Bare,
        QueryShape::PageNumber,
        QueryShape::SkipTake,
    ];

    /// Pagination parameters of this shape for the given intent
    pub fn pagination_pairs(&self, intent: &ListRequestIntent) -> Vec<(&'static str, String)> {
        let page = u64::from(intent.page());
        let limit = u64::from(intent.limit());
        match self {
            QueryShape::Bare => Vec::new(),
            QueryShape::PageNumber => vec![
                ("pageNumber", page.to_string()),
                ("pageSize", limit.to_string()),
            ],
            QueryShape::SkipTake => vec![
                ("skip", ((page - 1) * limit).to_string()),
                ("take", limit.to_string()),
            ],
        }
    }

    /// Full query of this shape: every filter unchanged, followed by the pagination parameters.
    ///
    /// A pagination parameter whose name is already used by a filter is dropped.
    pub fn query_pairs(&self, intent: &ListRequestIntent) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = intent
            .filters()
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect();

        for (key, value) in self.pagination_pairs(intent) {
            if intent.filters().contains_key(key) {
                warn!(
                    "Filter '{}' on {} overrides the {} pagination parameter",
                    key,
                    intent.resource_path(),
                    self
                );
                continue;
            }
            pairs.push((key.to_string(), value));
        }
        pairs
    }
}

impl fmt::Display for QueryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryShape::Bare => "bare",
            QueryShape::PageNumber => "pageNumber/pageSize",
            QueryShape::SkipTake => "skip/take",
        };
        f.write_str(name)
    }
}

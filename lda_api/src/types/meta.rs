use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw record as returned by the API: an untyped, possibly irregular, nested map.
pub type Record = Map<String, Value>;

/// One page of a paginated list endpoint.
///
/// Top-level keys other than the pagination fields are kept in `extra` so
/// they survive a round trip to JSON output.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PageResponse {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Record>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageResponse {
    /// Whether the server reports another page after this one.
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|next| !next.is_empty())
    }
}

/// Every page of a bulk fetch merged into one response.
///
/// Metadata comes from the first page; `results` holds the records of all
/// fetched pages in order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AggregatedResult {
    #[serde(flatten)]
    pub page: PageResponse,
    pub fetched_pages: u32,
}

impl AggregatedResult {
    pub fn results(&self) -> &[Record] {
        &self.page.results
    }
}

//! Pagination types
//!
//! Listing parameters, the per-page envelope and the mutable state a
//! paginator carries between fetches.

use super::cursor::Cursor;
use crate::dialect::Dialect;
use crate::http::ApiResponse;
use crate::types::JsonValue;
use tracing::warn;

/// Where a response carries its page tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSource {
    /// `next_cursor` / `previous_cursor` fields in the JSON body
    Body,
    /// `rel="next"` / `rel="previous"` entries in the `Link` header
    LinkHeader,
}

/// Filters, page size and sort for one listing.
///
/// Fixed once a paginator is built; only the cursor changes between fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    filters: Vec<(String, String)>,
    page_size: Option<u32>,
    sort: Option<String>,
}

impl ListParams {
    /// Empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter, sent verbatim as a query parameter
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the sort expression
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Use `size` unless a page size was already set
    #[must_use]
    pub fn or_page_size(mut self, size: Option<u32>) -> Self {
        if self.page_size.is_none() {
            self.page_size = size;
        }
        self
    }

    /// Configured filters
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Configured page size
    pub fn page_size_value(&self) -> Option<u32> {
        self.page_size
    }

    /// Query parameters for one fetch in `dialect`, with `cursor` appended
    /// under the dialect's cursor parameter when present
    pub fn to_query(&self, dialect: Dialect, cursor: Option<&str>) -> Vec<(String, String)> {
        let mut query = self.filters.clone();
        if let Some(size) = self.page_size {
            query.push((dialect.page_size_param().to_string(), size.to_string()));
        }
        if let Some(ref sort) = self.sort {
            query.push(("sort".to_string(), sort.clone()));
        }
        if let Some(cursor) = cursor {
            query.push((dialect.cursor_param().to_string(), cursor.to_string()));
        }
        query
    }
}

/// Raw records of one fetch paired with that fetch's cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Records in source order
    pub records: Vec<JsonValue>,
    /// Tokens derived from the same response
    pub cursor: Cursor,
}

impl Page {
    /// Decode a response.
    ///
    /// The item array is read from `items_key`; a missing, null or
    /// non-array value is an empty page. Tokens are read from `source` only.
    pub fn from_response(response: ApiResponse, items_key: &str, source: CursorSource) -> Self {
        let cursor = Cursor::from_response(&response, source);

        let mut body = response.body;
        let records = match body.get_mut(items_key).map(JsonValue::take) {
            Some(JsonValue::Array(items)) => items,
            None | Some(JsonValue::Null) => Vec::new(),
            Some(other) => {
                warn!(
                    items_key,
                    found = json_kind(&other),
                    "item key is not an array, treating page as empty"
                );
                Vec::new()
            }
        };

        Self { records, cursor }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Tracks pagination progress for one paginator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Token for the next fetch; `None` before the first fetch
    pub cursor: Option<String>,
    /// No further fetches will be made
    pub exhausted: bool,
    /// Pages fetched so far
    pub pages_fetched: usize,
    /// Records fetched so far
    pub items_fetched: usize,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    /// Record a fetched page: advance the token and decide whether another
    /// fetch may follow
    pub fn apply_page(&mut self, cursor: &Cursor, records: usize) {
        self.pages_fetched += 1;
        self.items_fetched += records;
        self.cursor = cursor.next().map(str::to_string);

        if records == 0 || !cursor.has_next() {
            self.mark_exhausted();
        }
    }
}

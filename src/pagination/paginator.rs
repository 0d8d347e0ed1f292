//! Lazy, forward-only paginated sequence

use super::types::{ListParams, Page, PaginationState};
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, ResourceCaller};
use crate::types::JsonValue;
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Maps one raw record into a typed item
pub type RecordMapper<T> = Box<dyn Fn(JsonValue) -> Result<T> + Send + Sync>;

/// Lazy sequence of typed items over one listing endpoint.
///
/// Each page is fetched only once the previous page's items are consumed.
/// The sequence is finite and cannot be restarted: once it reports the end,
/// build a new paginator to list again.
///
/// The dialect is fixed at construction. Fetches keep using it even if the
/// client's active dialect changes afterwards.
pub struct Paginator<T> {
    caller: Arc<dyn ResourceCaller>,
    dialect: Dialect,
    endpoint: String,
    items_key: String,
    params: ListParams,
    mapper: RecordMapper<T>,
    state: PaginationState,
    buffer: VecDeque<T>,
}

impl<T> Paginator<T> {
    /// Create a paginator with a custom record mapper
    pub fn new<F>(
        caller: Arc<dyn ResourceCaller>,
        dialect: Dialect,
        endpoint: impl Into<String>,
        items_key: impl Into<String>,
        params: ListParams,
        mapper: F,
    ) -> Self
    where
        F: Fn(JsonValue) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            caller,
            dialect,
            endpoint: endpoint.into(),
            items_key: items_key.into(),
            params,
            mapper: Box::new(mapper),
            state: PaginationState::new(),
            buffer: VecDeque::new(),
        }
    }

    /// Create a paginator that deserializes each record with serde
    pub fn deserializing(
        caller: Arc<dyn ResourceCaller>,
        dialect: Dialect,
        endpoint: impl Into<String>,
        items_key: impl Into<String>,
        params: ListParams,
    ) -> Self
    where
        T: DeserializeOwned + 'static,
    {
        let endpoint = endpoint.into();
        let label = endpoint.clone();
        Self::new(caller, dialect, endpoint, items_key, params, move |record| {
            serde_json::from_value(record).map_err(|e| Error::record_mapping(&label, e.to_string()))
        })
    }

    /// Dialect every fetch is issued in
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Listing endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Base parameters
    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Whether the source has signalled its last page
    pub fn is_exhausted(&self) -> bool {
        self.state.exhausted
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.state.pages_fetched
    }

    /// Number of records fetched so far
    pub fn items_fetched(&self) -> usize {
        self.state.items_fetched
    }

    /// Token the next fetch will send
    pub fn current_cursor(&self) -> Option<&str> {
        self.state.cursor.as_deref()
    }

    /// Items fetched but not yet yielded
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Advance by one item.
    ///
    /// Returns `Ok(None)` at the end of the sequence. A transport or mapping
    /// failure leaves the token where it was, so calling again retries the
    /// same page.
    pub async fn next(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.state.exhausted {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    /// Collect up to `n` items, crossing page boundaries as needed. No page
    /// beyond the one holding the `n`th item is fetched.
    pub async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while items.len() < n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// First item, if any
    pub async fn first(mut self) -> Result<Option<T>> {
        self.next().await
    }

    /// Drain every remaining item
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// The remaining items as a stream
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        stream::try_unfold(self, |mut paginator| async move {
            let item = paginator.next().await?;
            Ok::<_, Error>(item.map(|item| (item, paginator)))
        })
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let query = self
            .params
            .to_query(self.dialect, self.state.cursor.as_deref());
        let request = ApiRequest::get(self.endpoint.as_str(), self.dialect).extend_query(query);

        let response = self.caller.call(request).await?;
        let page = Page::from_response(response, &self.items_key, self.dialect.cursor_source());

        let mapper = &self.mapper;
        let items = page
            .records
            .into_iter()
            .map(|record| mapper(record))
            .collect::<Result<VecDeque<T>>>()?;

        self.state.apply_page(&page.cursor, items.len());
        debug!(
            endpoint = %self.endpoint,
            dialect = %self.dialect,
            page = self.state.pages_fetched,
            items = items.len(),
            has_next = page.cursor.has_next(),
            "fetched page"
        );

        self.buffer = items;
        Ok(())
    }
}

impl<T> std::fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("dialect", &self.dialect)
            .field("endpoint", &self.endpoint)
            .field("items_key", &self.items_key)
            .field("params", &self.params)
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

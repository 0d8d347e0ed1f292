//! API client
//!
//! [`Client`] ties together the configuration, a [`ResourceCaller`] and the
//! shared active dialect. Cloning a client is cheap and every clone sees the
//! same active dialect.
//!
//! Requests issued directly through the client read the active dialect at
//! call time. Paginators read it once, when they are built, and keep it for
//! their whole lifetime. A paginator built inside a [`DialectGuard`] scope
//! therefore keeps the guard's dialect even if it is drained after the guard
//! is released.

use crate::config::ClientConfig;
use crate::dialect::{ActiveDialect, Dialect, DialectGuard};
use crate::error::Result;
use crate::http::{ApiRequest, ApiResponse, HttpTransport, ResourceCaller};
use crate::pagination::{ListParams, Paginator};
use crate::types::{JsonValue, Method};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

/// A listing endpoint: where it lives, where its items are in the body, and
/// whether it only exists in one dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Endpoint path
    pub endpoint: String,
    /// Body key holding the item array
    pub items_key: String,
    /// Dialect the endpoint requires, if any
    pub dialect: Option<Dialect>,
}

impl Listing {
    /// Listing available in both dialects
    pub fn new(endpoint: impl Into<String>, items_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            items_key: items_key.into(),
            dialect: None,
        }
    }

    /// Restrict the listing to one dialect
    #[must_use]
    pub fn only_in(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }
}

struct ClientInner {
    config: ClientConfig,
    caller: Arc<dyn ResourceCaller>,
    active: ActiveDialect,
}

/// Dialect-aware API client
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Create a client talking HTTP to `config.base_url`
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_caller(config, Arc::new(transport)))
    }

    /// Create a client over a custom resource caller
    pub fn with_caller(config: ClientConfig, caller: Arc<dyn ResourceCaller>) -> Self {
        let active = ActiveDialect::new(config.dialect);
        Self {
            inner: Arc::new(ClientInner {
                config,
                caller,
                active,
            }),
        }
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Currently active dialect
    pub fn dialect(&self) -> Dialect {
        self.inner.active.get()
    }

    /// Change the active dialect for every clone of this client
    pub fn set_dialect(&self, dialect: Dialect) {
        self.inner.active.set(dialect);
    }

    /// Switch to `dialect` until the returned guard is dropped
    pub fn enter_dialect(&self, dialect: Dialect) -> DialectGuard {
        self.inner.active.enter(dialect)
    }

    /// Run `f` with `dialect` active, then restore the previous dialect.
    ///
    /// Restoration happens whether `f` succeeds, fails, panics or is
    /// cancelled; its result is returned unchanged.
    pub async fn with_dialect<F, Fut, T>(&self, dialect: Dialect, f: F) -> Result<T>
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let _guard = self.enter_dialect(dialect);
        f(self.clone()).await
    }

    // ========================================================================
    // Single requests
    // ========================================================================

    /// Start a request in the active dialect
    pub fn request(&self, method: Method, path: impl Into<String>) -> ApiRequest {
        ApiRequest::new(method, path, self.dialect())
    }

    /// Send a request through the resource caller
    pub async fn call(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.inner.caller.call(request).await
    }

    /// GET `path` and return the decoded body
    pub async fn get(&self, path: &str) -> Result<JsonValue> {
        Ok(self.call(self.request(Method::GET, path)).await?.body)
    }

    /// POST a JSON body to `path`
    pub async fn post(&self, path: &str, body: JsonValue) -> Result<JsonValue> {
        Ok(self
            .call(self.request(Method::POST, path).json(body))
            .await?
            .body)
    }

    /// PUT a JSON body to `path`
    pub async fn put(&self, path: &str, body: JsonValue) -> Result<JsonValue> {
        Ok(self
            .call(self.request(Method::PUT, path).json(body))
            .await?
            .body)
    }

    /// DELETE `path`
    pub async fn delete(&self, path: &str) -> Result<JsonValue> {
        Ok(self.call(self.request(Method::DELETE, path)).await?.body)
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// Paginate `endpoint`, deserializing each record into `T`
    pub fn list<T>(&self, endpoint: &str, items_key: &str, params: ListParams) -> Paginator<T>
    where
        T: DeserializeOwned + 'static,
    {
        Paginator::deserializing(
            self.inner.caller.clone(),
            self.dialect(),
            endpoint,
            items_key,
            params.or_page_size(self.inner.config.default_page_size),
        )
    }

    /// Paginate `endpoint` with a custom record mapper
    pub fn list_with<T, F>(
        &self,
        endpoint: &str,
        items_key: &str,
        params: ListParams,
        mapper: F,
    ) -> Paginator<T>
    where
        F: Fn(JsonValue) -> Result<T> + Send + Sync + 'static,
    {
        Paginator::new(
            self.inner.caller.clone(),
            self.dialect(),
            endpoint,
            items_key,
            params.or_page_size(self.inner.config.default_page_size),
            mapper,
        )
    }

    /// Lazy paginator over `listing`, built in the listing's required dialect
    /// when it has one. The active dialect is restored before this returns;
    /// the paginator keeps the dialect it was built with.
    pub fn paginate<T>(&self, listing: &Listing, params: ListParams) -> Paginator<T>
    where
        T: DeserializeOwned + 'static,
    {
        let _guard = listing.dialect.map(|dialect| self.enter_dialect(dialect));
        self.list(&listing.endpoint, &listing.items_key, params)
    }

    /// Drain `listing` eagerly, keeping its required dialect active for the
    /// whole drain
    pub async fn fetch_all<T>(&self, listing: &Listing, params: ListParams) -> Result<Vec<T>>
    where
        T: DeserializeOwned + 'static,
    {
        let _guard = listing.dialect.map(|dialect| self.enter_dialect(dialect));
        self.list(&listing.endpoint, &listing.items_key, params)
            .collect_all()
            .await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.config.base_url)
            .field("dialect", &self.dialect())
            .finish_non_exhaustive()
    }
}

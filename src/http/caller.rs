//! Request/response envelope and the transport trait

use crate::dialect::Dialect;
use crate::error::Result;
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, LINK};

/// A single call to the API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Path relative to the configured base URL (or an absolute URL)
    pub path: String,
    /// Query parameters, in the order they are sent
    pub query: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<JsonValue>,
    /// Dialect this call is issued in
    pub dialect: Dialect,
}

impl ApiRequest {
    /// Create a request
    pub fn new(method: Method, path: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            dialect,
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>, dialect: Dialect) -> Self {
        Self::new(Method::GET, path, dialect)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn extend_query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a query parameter by name
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A decoded response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded JSON body (`Null` for an empty body)
    pub body: JsonValue,
}

impl ApiResponse {
    /// Create a 200 response with no headers
    pub fn ok(body: JsonValue) -> Self {
        Self {
            status: 200,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Attach a `Link` header. Values that are not valid header text are
    /// dropped.
    #[must_use]
    pub fn with_link(mut self, link: &str) -> Self {
        if let Ok(value) = link.parse() {
            self.headers.insert(LINK, value);
        }
        self
    }

    /// `Link` header text, with repeated header lines joined into one list.
    /// Lines that are not valid UTF-8 are skipped.
    pub fn link_header(&self) -> Option<String> {
        let lines: Vec<&str> = self
            .headers
            .get_all(LINK)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join(", "))
        }
    }
}

/// Performs network requests on behalf of the client.
///
/// Implementations own transport concerns only; they never interpret
/// pagination metadata.
#[async_trait]
pub trait ResourceCaller: Send + Sync {
    /// Issue `request` and return the decoded response
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse>;
}

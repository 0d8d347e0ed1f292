//! reqwest-backed resource caller
//!
//! Handles:
//! - Base URL joining and default headers
//! - The dialect selector header on every request
//! - Optional bearer authentication and rate limiting
//! - JSON body decoding and status classification

use super::caller::{ApiRequest, ApiResponse, ResourceCaller};
use super::rate_limit::RateLimiter;
use crate::config::{ClientConfig, DialectHeader};
use crate::error::{Error, Result};
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP implementation of [`ResourceCaller`]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
    dialect_header: DialectHeader,
    default_headers: StringMap,
    api_key: Option<String>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpTransport {
    /// Build a transport from a client config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            dialect_header: config.dialect_header.clone(),
            default_headers: config.headers.clone(),
            api_key: config.api_key.clone(),
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
        })
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(err)
        }
    }
}

#[async_trait]
impl ResourceCaller for HttpTransport {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let url = self.build_url(&request.path);
        let mut req = self.client.request(request.method.into(), &url);

        for (key, value) in &self.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        req = req.header(
            self.dialect_header.name.as_str(),
            self.dialect_header.value_for(request.dialect),
        );

        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        debug!(
            method = %request.method,
            url = %url,
            dialect = %request.dialect,
            "sending request"
        );

        let response = req.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(Error::http_status(status.as_u16(), text));
        }

        let body = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| Error::decode(format!("invalid JSON from {url}: {e}")))?
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("dialect_header", &self.dialect_header)
            .field("has_api_key", &self.api_key.is_some())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

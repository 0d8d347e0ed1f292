//! HTTP transport module
//!
//! The pagination engine never talks to the network directly. It hands an
//! [`ApiRequest`] to a [`ResourceCaller`] and gets back a decoded body plus
//! the response headers.
//!
//! # Features
//!
//! - **Dialect header**: every request carries its dialect selector
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Authentication**: optional bearer token
//!
//! There is no retry or backoff: a failed call surfaces immediately.

mod caller;
mod client;
mod rate_limit;

pub use caller::{ApiRequest, ApiResponse, ResourceCaller};
pub use client::HttpTransport;
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
pub(crate) mod mock;

//! # pagewise
//!
//! A typed client for a versioned, cursor-paginated, resource-oriented HTTP
//! API that speaks two dialects at once.
//!
//! ## Features
//!
//! - **Lazy pagination**: pages are fetched one at a time as items are consumed
//! - **Dual cursor transport**: body `next_cursor` fields or `Link` headers,
//!   chosen by dialect
//! - **Scoped dialect switching**: RAII guards that always restore the
//!   previous dialect
//! - **Pluggable transport**: anything implementing [`http::ResourceCaller`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewise::{Client, ClientConfig, Dialect, ListParams, Listing, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(ClientConfig::new("https://api.example.com/v2"))?;
//!
//!     // Lazily walk every active widget.
//!     let mut widgets = client.list::<serde_json::Value>(
//!         "/widgets",
//!         "widgets",
//!         ListParams::new().filter("status", "active").page_size(50),
//!     );
//!     while let Some(widget) = widgets.next().await? {
//!         println!("{widget}");
//!     }
//!
//!     // An endpoint that only exists in the old dialect.
//!     let archived = Listing::new("/widgets/archived", "widgets").only_in(Dialect::Old);
//!     let all: Vec<serde_json::Value> = client.fetch_all(&archived, ListParams::new()).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                            Client                            │
//! │   list() / paginate() → Paginator     with_dialect(d, body)  │
//! └──────────────────────────────────────────────────────────────┘
//!               │                                  │
//! ┌─────────────┴──────────────┐     ┌─────────────┴────────────┐
//! │         Paginator          │     │       DialectGuard       │
//! │  buffer → fetch → Cursor   │     │  enter → body → restore  │
//! └─────────────┬──────────────┘     └──────────────────────────┘
//!               │
//! ┌─────────────┴──────────────┐
//! │       ResourceCaller       │
//! │  HttpTransport (reqwest)   │
//! └────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Dialect selection and scoped switching
pub mod dialect;

/// Resource caller trait and HTTP transport
pub mod http;

/// Cursor extraction and lazy pagination
pub mod pagination;

/// Dialect-aware API client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{Client, Listing};
pub use config::ClientConfig;
pub use dialect::{Dialect, DialectGuard};
pub use error::{Error, Result};
pub use pagination::{Cursor, ListParams, Paginator};
pub use types::*;

//! Dialect module
//!
//! The API speaks two dialects concurrently. They differ in pagination
//! transport and in the names of the paging query parameters.
//!
//! # Overview
//!
//! - [`Dialect`] - the `old` / `new` selector and its wire conventions
//! - [`ActiveDialect`] - the client's shared, mutable active dialect
//! - [`DialectGuard`] - scoped switch that restores the prior dialect on drop

mod guard;
mod types;

pub use guard::{ActiveDialect, DialectGuard};
pub use types::Dialect;

#[cfg(test)]
mod tests;

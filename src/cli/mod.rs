//! CLI module
//!
//! Command-line interface for exercising the client.
//!
//! # Commands
//!
//! - `list` - Walk a listing endpoint and print one JSON item per line
//! - `cursor` - Show the cursor extracted from a `Link` header or JSON body

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

//! CLI commands and argument parsing

use crate::dialect::Dialect;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pagewise command-line client
#[derive(Parser, Debug)]
#[command(name = "pagewise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL, overriding the config file and environment
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Dialect to issue requests in
    #[arg(short, long, global = true, value_enum)]
    pub dialect: Option<Dialect>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk a listing endpoint, printing one JSON item per line
    List {
        /// Endpoint path, e.g. /widgets
        endpoint: String,

        /// Body key holding the item array
        #[arg(long, default_value = "data")]
        items_key: String,

        /// Items per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Filter as key=value (repeatable)
        #[arg(long = "filter", value_parser = parse_key_val)]
        filters: Vec<(String, String)>,

        /// Sort expression
        #[arg(long)]
        sort: Option<String>,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,

        /// Pretty-print each item
        #[arg(long)]
        pretty: bool,
    },

    /// Extract a cursor from a Link header or JSON body
    Cursor {
        /// Link header value
        #[arg(long, conflicts_with = "body", required_unless_present = "body")]
        link: Option<String>,

        /// JSON response body
        #[arg(long)]
        body: Option<String>,
    },
}

/// Parse `key=value`
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{s}'")),
    }
}

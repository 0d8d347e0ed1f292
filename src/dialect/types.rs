//! Dialect selector and per-dialect wire conventions

use crate::error::{Error, Result};
use crate::pagination::CursorSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two request/response conventions the API supports
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Legacy dialect: pagination tokens travel in the `Link` header
    Old,
    /// Current dialect: pagination tokens travel in the response body
    #[default]
    New,
}

impl Dialect {
    /// Lowercase wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    /// Where this dialect puts its next/previous page tokens
    pub fn cursor_source(self) -> CursorSource {
        match self {
            Self::Old => CursorSource::LinkHeader,
            Self::New => CursorSource::Body,
        }
    }

    /// Query parameter carrying the cursor token on follow-up fetches
    pub fn cursor_param(self) -> &'static str {
        match self {
            Self::Old => "cursor",
            Self::New => "page_cursor",
        }
    }

    /// Query parameter carrying the page size
    pub fn page_size_param(self) -> &'static str {
        match self {
            Self::Old => "per_page",
            Self::New => "limit",
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        match self {
            Self::Old => 0,
            Self::New => 1,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        if value == 0 {
            Self::Old
        } else {
            Self::New
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Ok(Self::Old),
            "new" => Ok(Self::New),
            other => Err(Error::invalid_value(
                "dialect",
                format!("expected 'old' or 'new', got '{other}'"),
            )),
        }
    }
}

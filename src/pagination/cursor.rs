//! Cursor extraction
//!
//! Reads next/previous page tokens from either wire form:
//! - body fields: `next_cursor` / `previous_cursor` (or `next` / `previous`)
//! - `Link` header: `<https://api.example.com/items?cursor=abc>; rel="next", ...`

use super::types::CursorSource;
use crate::http::ApiResponse;
use crate::types::JsonValue;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Query parameter inside `Link` URLs that carries the token
pub const LINK_CURSOR_PARAM: &str = "cursor";

const NEXT_KEYS: [&str; 2] = ["next_cursor", "next"];
const PREVIOUS_KEYS: [&str; 2] = ["previous_cursor", "previous"];

/// `<url>` followed by the (possibly empty) `;`-separated parameter list
static LINK_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*<([^<>]*)>\s*(.*)$").expect("link entry pattern is valid"));

/// Opaque forward/backward page tokens for one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    next: Option<String>,
    previous: Option<String>,
}

impl Cursor {
    /// Create a cursor from explicit tokens
    pub fn new(next: Option<String>, previous: Option<String>) -> Self {
        Self { next, previous }
    }

    /// A cursor with no tokens: no pages in either direction
    pub fn empty() -> Self {
        Self::default()
    }

    /// Token for the next page
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Token for the previous page
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Whether a non-empty next token is present
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether a non-empty previous token is present
    pub fn has_previous(&self) -> bool {
        self.previous.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Read tokens from a decoded response body.
    ///
    /// Absent or null keys yield no token. Strings are taken verbatim and
    /// numbers as their decimal text; any other value is ignored.
    pub fn from_body(body: &JsonValue) -> Self {
        Self {
            next: body_token(body, &NEXT_KEYS),
            previous: body_token(body, &PREVIOUS_KEYS),
        }
    }

    /// Read tokens from a `Link` header value.
    ///
    /// The token for each relation is the percent-decoded `cursor` query
    /// parameter of its URL. A header that does not follow the
    /// `<url>; rel="..."` grammar yields an empty cursor.
    pub fn from_link_header(header: &str) -> Self {
        match parse_link_header(header) {
            Some(cursor) => cursor,
            None => {
                warn!(header, "malformed Link header, treating as last page");
                Self::empty()
            }
        }
    }

    /// Read tokens from a response using the given wire form only
    pub fn from_response(response: &ApiResponse, source: CursorSource) -> Self {
        match source {
            CursorSource::Body => Self::from_body(&response.body),
            CursorSource::LinkHeader => response
                .link_header()
                .as_deref()
                .map(Self::from_link_header)
                .unwrap_or_default(),
        }
    }
}

fn body_token(body: &JsonValue, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| body.get(*key))
        .find_map(|value| match value {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Returns `None` when the header is malformed
fn parse_link_header(header: &str) -> Option<Cursor> {
    let mut cursor = Cursor::empty();

    for entry in split_entries(header) {
        if entry.trim().is_empty() {
            continue;
        }

        let caps = LINK_ENTRY.captures(entry)?;
        let url = caps.get(1)?.as_str().trim();
        let params = caps.get(2)?.as_str().trim();
        if !params.is_empty() && !params.starts_with(';') {
            return None;
        }

        let rels = link_rels(params)?;
        for rel in rels.split_whitespace() {
            let slot = match rel.to_ascii_lowercase().as_str() {
                "next" => &mut cursor.next,
                "previous" | "prev" => &mut cursor.previous,
                _ => continue,
            };
            if slot.is_none() {
                *slot = cursor_from_url(url);
            }
        }
    }

    Some(cursor)
}

/// Split on commas that sit outside `<...>` and outside quoted values
fn split_entries(header: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_url = false;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in header.char_indices() {
        match c {
            '<' if !in_quotes => in_url = true,
            '>' if !in_quotes => in_url = false,
            '"' if !in_url => in_quotes = !in_quotes,
            ',' if !in_url && !in_quotes => {
                entries.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&header[start..]);
    entries
}

/// Value of the `rel` parameter; `None` if a parameter is malformed or `rel`
/// is missing
fn link_rels(params: &str) -> Option<String> {
    let mut rel = None;

    for param in params.split(';').skip(1) {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }
        let (name, value) = match param.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => (param, ""),
        };
        if name.is_empty() || name.contains(char::is_whitespace) {
            return None;
        }
        if name.eq_ignore_ascii_case("rel") && rel.is_none() {
            let value = value.trim_matches('"').trim_matches('\'').trim();
            if value.is_empty() {
                return None;
            }
            rel = Some(value.to_string());
        }
    }

    rel
}

fn cursor_from_url(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);
    // Percent-decoding only: a literal '+' is part of the token.
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| percent_decode_str(key).decode_utf8_lossy() == LINK_CURSOR_PARAM)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
}

//! Pagination module
//!
//! Supports: body-encoded cursors and `Link` header cursors
//!
//! # Overview
//!
//! A [`Paginator`] is a lazy, forward-only sequence of typed items over one
//! listing endpoint. Pages are fetched one at a time through a
//! [`ResourceCaller`](crate::http::ResourceCaller); after each fetch the
//! [`Cursor`] for the next page is read from wherever the paginator's
//! dialect puts it ([`CursorSource`]).
//!
//! Malformed pagination metadata never fails a listing. It reads as
//! "no further page" and iteration ends cleanly.

mod cursor;
mod paginator;
mod types;

pub use cursor::{Cursor, LINK_CURSOR_PARAM};
pub use paginator::{Paginator, RecordMapper};
pub use types::{CursorSource, ListParams, Page, PaginationState};

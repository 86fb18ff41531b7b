//! Cursor pagination
//!
//! Turns an ordered, filtered result stream into discrete pages without
//! total counts: the query fetches one row more than the page size, and
//! the presence of that extra row is the "next page exists" signal. The
//! cursor is the identifier of the last visible row and means "strictly
//! before this id" under the active sort.
//!
//! This is correct only because ids are assigned monotonically at creation
//! time and the recency-derived sorts follow that order; title sort does
//! not, so the catalog service refuses to combine it with a cursor.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one
pub const DEFAULT_LIMIT: i64 = 24;

/// Upper bound on page size
pub const MAX_LIMIT: i64 = 48;

/// Clamp a requested page size to the allowed range
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// One page of results plus the continuation token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Identifier to pass as the next request's cursor; None on the last page
    pub next_cursor: Option<i64>,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with a `limit + 1` lookahead.
    ///
    /// `rows` must hold at most `limit + 1` entries. When the lookahead row
    /// is present it is discarded and the id of the last visible row
    /// becomes the cursor; otherwise this is the final page.
    pub fn from_lookahead(mut rows: Vec<T>, limit: i64, id_of: impl Fn(&T) -> i64) -> Self {
        let limit = limit.max(1) as usize;

        if rows.len() > limit {
            rows.truncate(limit);
            let next_cursor = rows.last().map(&id_of);
            Page {
                items: rows,
                next_cursor,
            }
        } else {
            Page {
                items: rows,
                next_cursor: None,
            }
        }
    }

    /// Drop the continuation token (used under sorts that cannot honor it)
    pub fn without_cursor(mut self) -> Self {
        self.next_cursor = None;
        self
    }
}

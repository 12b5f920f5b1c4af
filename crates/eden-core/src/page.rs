//! Page types.
//!
//! Backends answer page requests in one of two shapes: a bare array
//! (a single full page, no pagination envelope) or an envelope with
//! `results` and a `next` cursor. `PageResponse` models both; the rest
//! of the system only ever sees the normalized `Page`.

use serde::{Deserialize, Serialize};

/// A normalized page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order. The client never re-sorts.
    pub items: Vec<T>,

    /// Whether more pages may exist after this one.
    pub has_next: bool,
}

impl<T> Page<T> {
    /// A page known to be the last one.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
        }
    }

    /// An empty final page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_next: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Raw wire shape of a page response.
///
/// Deserialization tries the envelope first, then falls back to the
/// bare array, so both backend generations are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageResponse<T> {
    /// Paginated envelope: `{ "results": [...], "next": "..." | null }`.
    Paged {
        results: Vec<T>,
        #[serde(default)]
        next: Option<String>,
    },

    /// A bare array, treated as a single full page.
    Full(Vec<T>),
}

impl<T> PageResponse<T> {
    /// Normalize into a `Page`.
    ///
    /// `has_next` is true when the envelope carries a `next` cursor.
    /// When the cursor is absent, a page of exactly `page_size` items
    /// is still treated as "more may exist" - some backends omit the
    /// indicator and only a short page proves exhaustion.
    pub fn normalize(self, page_size: usize) -> Page<T> {
        match self {
            PageResponse::Paged { results, next } => {
                let has_next = next.is_some() || (page_size > 0 && results.len() == page_size);
                Page {
                    items: results,
                    has_next,
                }
            }
            PageResponse::Full(items) => Page {
                items,
                has_next: false,
            },
        }
    }
}

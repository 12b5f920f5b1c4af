//! Candidate source boundary for the Eden picker.
//!
//! The picker never talks to a backend directly; it consumes the
//! `CandidateSource` trait. The trait returns futures, allowing the
//! caller to spawn them however it wants, and making sources trivially
//! mockable for tests.
//!
//! The wire format (URL paths, query-string names, JSON envelope) is
//! owned entirely by the backend. This crate only fixes the two
//! function signatures and the tolerant decoding of page payloads.

mod decode;
mod memory;

pub use decode::decode_page;
pub use memory::{PageRequest, StaticCatalog};

use futures::future::BoxFuture;

use eden_core::{Candidate, CandidateId, Page, SourceError};

/// A server-held collection of candidates, searched page by page.
///
/// ## Contract
///
/// - `fetch_page` returns candidates in server order (relevance
///   ranking is a backend concern; clients never re-sort).
/// - `page` is 1-based.
/// - `fetch_by_id` exists only to backfill a selected-but-not-loaded
///   candidate so its label can be displayed.
pub trait CandidateSource: Send + Sync {
    /// Fetch one page of candidates matching `query`.
    ///
    /// An empty or `None` query means "browse": the backend's default
    /// ordering of the full collection.
    fn fetch_page(
        &self,
        query: Option<String>,
        page: u32,
        page_size: u32,
    ) -> BoxFuture<'static, Result<Page<Candidate>, SourceError>>;

    /// Fetch a single candidate by id.
    fn fetch_by_id(
        &self,
        id: CandidateId,
    ) -> BoxFuture<'static, Result<Candidate, SourceError>>;
}

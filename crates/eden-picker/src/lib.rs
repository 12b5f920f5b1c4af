//! Debounced, paginated candidate picker engine.
//!
//! The picker lets a user find and choose exactly one candidate from a
//! potentially large, server-held collection: free-text search with a
//! debounce, incremental page loading, keyboard navigation, and
//! last-query-wins protection against stale responses. It is
//! UI-toolkit independent: frontends subscribe to snapshots and feed
//! in text and keys.

pub mod keys;
pub mod model;
pub mod options;
pub mod pagination;
pub mod picker;

pub use keys::Key;
pub use options::PickerOptions;
pub use pagination::{page_window, PageEntry, PageTarget, Pagination};
pub use picker::{Picker, PickerSnapshot};

//! Core types for the Eden picker.
//!
//! This crate contains shared data structures that are used across all
//! Eden crates:
//! - Candidate types for search results
//! - Normalized page types and the tolerant wire shapes
//! - Configuration types
//! - Error types

mod candidate;
mod config;
mod error;
mod page;

pub use candidate::{Candidate, CandidateId};
pub use config::{config_dir, config_file_path, ensure_config_dir, PickerConfig};
pub use error::{ConfigError, SourceError};
pub use page::{Page, PageResponse};

//! Error types for the Eden picker.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by candidate sources.
///
/// The picker swallows these by design (logged, never surfaced as a
/// blocking state), but sources report them precisely so callers that
/// do care can inspect them.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (connection refused, DNS, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status.
    #[error("server returned status {status}")]
    Status { status: u16 },

    /// Response body did not match any accepted shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A by-id lookup found nothing.
    #[error("candidate '{0}' not found")]
    NotFound(String),

    /// Source-side timeout.
    #[error("source timed out after {duration:?}")]
    Timeout { duration: Duration },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

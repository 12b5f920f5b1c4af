//! Configuration types.
//!
//! The picker ships sensible defaults (300ms debounce, 25-item pages);
//! deployments can override them via `picker.toml` in the platform
//! config directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Debounce applied between the last keystroke and the search fetch.
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Items requested per page.
const DEFAULT_PAGE_SIZE: u32 = 25;

/// Tunable picker defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickerConfig {
    /// Milliseconds of input quiescence before a search is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Items requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PickerConfig {
    /// The debounce interval as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults; a present-but-invalid file
    /// is an error so typos do not silently revert to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(_) => Ok(Self::default()),
            None => Err(ConfigError::NoConfigDir),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("eden"))
}

/// Get the path to picker.toml.
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("picker.toml"))
}

/// Ensure the config directory exists.
pub fn ensure_config_dir() -> std::io::Result<()> {
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "debounce_ms = 150").unwrap();
        writeln!(file, "page_size = 10").unwrap();

        let config = PickerConfig::load_from(&path).unwrap();
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.toml");
        std::fs::write(&path, "page_size = 50\n").unwrap();

        let config = PickerConfig::load_from(&path).unwrap();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.toml");
        std::fs::write(&path, "debounce_ms = \"soon\"\n").unwrap();

        assert!(matches!(
            PickerConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}

//! Picker options.

use std::time::Duration;

use eden_core::{CandidateId, PickerConfig};

/// Per-instance picker options.
///
/// These mirror what the embedding form passes down. The selection id
/// stays owned by the form; the picker only reads it.
#[derive(Debug, Clone)]
pub struct PickerOptions {
    /// Placeholder text for the search input.
    pub placeholder: String,

    /// Items requested per page.
    pub page_size: u32,

    /// Milliseconds of input quiescence before a search is issued.
    pub debounce: Duration,

    /// Selection already held by the embedding form, if any.
    pub initial_selection: Option<CandidateId>,

    /// Allow selecting candidates with zero available quantity.
    pub allow_zero_quantity: bool,

    /// Render a stock badge next to each candidate.
    pub show_quantity_badge: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self::from_config(&PickerConfig::default())
    }
}

impl PickerOptions {
    /// Build options from loaded configuration.
    pub fn from_config(config: &PickerConfig) -> Self {
        Self {
            placeholder: "Search...".to_string(),
            page_size: config.page_size,
            debounce: config.debounce(),
            initial_selection: None,
            allow_zero_quantity: false,
            show_quantity_badge: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_selection(mut self, id: impl Into<CandidateId>) -> Self {
        self.initial_selection = Some(id.into());
        self
    }

    pub fn allow_zero_quantity(mut self, allow: bool) -> Self {
        self.allow_zero_quantity = allow;
        self
    }

    pub fn show_quantity_badge(mut self, show: bool) -> Self {
        self.show_quantity_badge = show;
        self
    }
}

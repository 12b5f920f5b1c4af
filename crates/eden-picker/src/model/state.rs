//! Picker state machine.

use eden_core::{Candidate, Page};

// =============================================================================
// Picker Phase State Machine
// =============================================================================

/// Top-level state machine. Invalid states are impossible.
#[derive(Debug, Default)]
pub enum PickerPhase {
    /// Panel is closed, no candidate list visible.
    #[default]
    Closed,
    /// Panel is open with full query state.
    Open(OpenState),
}

impl PickerPhase {
    /// Get the open state if the panel is open.
    pub fn open(&self) -> Option<&OpenState> {
        match self {
            PickerPhase::Open(state) => Some(state),
            PickerPhase::Closed => None,
        }
    }

    /// Get mutable open state if the panel is open.
    pub fn open_mut(&mut self) -> Option<&mut OpenState> {
        match self {
            PickerPhase::Open(state) => Some(state),
            PickerPhase::Closed => None,
        }
    }

    /// Check if the panel is open.
    pub fn is_open(&self) -> bool {
        matches!(self, PickerPhase::Open(_))
    }
}

// =============================================================================
// Open State
// =============================================================================

/// Query state while the panel is open.
///
/// Lives from open to close; a reopen starts fresh at page 1.
#[derive(Debug)]
pub struct OpenState {
    /// Current search query.
    pub query: String,

    /// Query the current candidate list was fetched with. `None`
    /// until a page commits; trails `query` while a debounced search
    /// is pending.
    pub results_query: Option<String>,

    /// Candidates in server order. Ids are unique.
    pub candidates: Vec<Candidate>,

    /// Last page applied (1-based). Zero until a page commits.
    pub page: u32,

    /// Whether more pages may exist.
    pub has_more: bool,

    /// Whether a fetch is in progress.
    pub loading: bool,

    /// Keyboard cursor. Always a valid index or `None`.
    pub cursor: Option<usize>,
}

impl OpenState {
    /// Create a fresh open state for the given query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results_query: None,
            candidates: Vec::new(),
            page: 0,
            has_more: false,
            loading: false,
            cursor: None,
        }
    }

    /// Replace the candidate list with a fresh page 1.
    pub fn replace_with(&mut self, page: Page<Candidate>) {
        self.candidates = page.items;
        dedup_by_id(&mut self.candidates);
        self.results_query = Some(self.query.clone());
        self.page = 1;
        self.has_more = page.has_next;
        self.loading = false;
        self.clamp_cursor();
    }

    /// Whether the candidate list belongs to the current query.
    ///
    /// False while a retyped query's debounced search has not
    /// committed yet; paging a list the user has already retyped away
    /// from would splice two result sets together.
    pub fn results_are_current(&self) -> bool {
        self.results_query.as_deref() == Some(self.query.as_str())
    }

    /// Append the next page, preserving existing items and order.
    ///
    /// Items whose id is already present are skipped so row keys stay
    /// unique.
    pub fn append(&mut self, page: Page<Candidate>) {
        for item in page.items {
            if !self.contains(&item.id) {
                self.candidates.push(item);
            }
        }
        self.page += 1;
        self.has_more = page.has_next;
        self.loading = false;
        self.clamp_cursor();
    }

    /// Prepend a backfilled candidate (the current selection when it
    /// did not appear on page 1) so its label can always be displayed.
    pub fn prepend(&mut self, candidate: Candidate) {
        if !self.contains(&candidate.id) {
            self.candidates.insert(0, candidate);
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.candidates.iter().any(|c| c.id == id)
    }

    /// Clamp the cursor back into range after the list changed.
    pub fn clamp_cursor(&mut self) {
        match self.cursor {
            Some(_) if self.candidates.is_empty() => self.cursor = None,
            Some(i) if i >= self.candidates.len() => {
                self.cursor = Some(self.candidates.len() - 1);
            }
            _ => {}
        }
    }

    /// Move the cursor up one row, clamped to the first row.
    pub fn cursor_up(&mut self) {
        if self.candidates.is_empty() {
            self.cursor = None;
            return;
        }
        self.cursor = Some(match self.cursor {
            Some(i) => i.saturating_sub(1),
            None => 0,
        });
    }

    /// Move the cursor down one row, clamped to the last row.
    pub fn cursor_down(&mut self) {
        if self.candidates.is_empty() {
            self.cursor = None;
            return;
        }
        let last = self.candidates.len() - 1;
        self.cursor = Some(match self.cursor {
            Some(i) => (i + 1).min(last),
            None => 0,
        });
    }

    /// Get the candidate at the cursor position.
    pub fn cursor_candidate(&self) -> Option<&Candidate> {
        self.cursor.and_then(|i| self.candidates.get(i))
    }
}

fn dedup_by_id(candidates: &mut Vec<Candidate>) {
    let mut seen = std::collections::HashSet::new();
    candidates.retain(|c| seen.insert(c.id.clone()));
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: &str) -> Candidate {
        Candidate::new(id, format!("Candidate {id}"))
    }

    fn page(ids: &[&str], has_next: bool) -> Page<Candidate> {
        Page {
            items: ids.iter().map(|id| c(id)).collect(),
            has_next,
        }
    }

    #[test]
    fn test_phase_default_is_closed() {
        let phase = PickerPhase::default();
        assert!(!phase.is_open());
        assert!(phase.open().is_none());
    }

    #[test]
    fn test_replace_resets_to_page_one() {
        let mut state = OpenState::new("rose");
        state.append(page(&["1", "2"], true));
        assert_eq!(state.page, 1);

        state.replace_with(page(&["5"], false));
        assert_eq!(state.page, 1);
        assert_eq!(state.candidates.len(), 1);
        assert!(!state.has_more);
        assert!(!state.loading);
    }

    #[test]
    fn test_append_preserves_prefix_order() {
        let mut state = OpenState::new("");
        state.replace_with(page(&["1", "2", "3"], true));
        state.append(page(&["4", "5"], false));

        let ids: Vec<&str> = state.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(state.page, 2);
        assert!(!state.has_more);
    }

    #[test]
    fn test_append_skips_duplicate_ids() {
        let mut state = OpenState::new("");
        state.replace_with(page(&["1", "2"], true));
        state.append(page(&["2", "3"], false));

        let ids: Vec<&str> = state.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_results_trail_a_retyped_query() {
        let mut state = OpenState::new("ro");
        assert!(!state.results_are_current());

        state.replace_with(page(&["1", "2"], true));
        assert!(state.results_are_current());

        // Retyping leaves the old list on screen until the next
        // page-1 commit; it must not be paged further meanwhile.
        state.query = "rose".to_string();
        assert!(!state.results_are_current());

        state.replace_with(page(&["1"], false));
        assert!(state.results_are_current());
    }

    #[test]
    fn test_cursor_clamps_when_list_shrinks() {
        let mut state = OpenState::new("");
        state.replace_with(page(&["1", "2", "3", "4", "5"], false));
        state.cursor = Some(4);

        state.replace_with(page(&["1", "2"], false));
        assert_eq!(state.cursor, Some(1));

        state.replace_with(page(&[], false));
        assert_eq!(state.cursor, None);
    }

    #[test]
    fn test_cursor_navigation_clamps_to_bounds() {
        let mut state = OpenState::new("");
        state.replace_with(page(&["1", "2", "3"], false));

        // No cursor yet: first movement lands on row 0.
        state.cursor_down();
        assert_eq!(state.cursor, Some(0));

        state.cursor_down();
        state.cursor_down();
        assert_eq!(state.cursor, Some(2));

        // Clamped at the last row.
        state.cursor_down();
        assert_eq!(state.cursor, Some(2));

        state.cursor_up();
        state.cursor_up();
        state.cursor_up();
        assert_eq!(state.cursor, Some(0));

        // Clamped at the first row.
        state.cursor_up();
        assert_eq!(state.cursor, Some(0));
    }

    #[test]
    fn test_cursor_on_empty_list() {
        let mut state = OpenState::new("");
        state.cursor_down();
        assert_eq!(state.cursor, None);
        assert!(state.cursor_candidate().is_none());
    }

    #[test]
    fn test_prepend_backfill() {
        let mut state = OpenState::new("");
        state.replace_with(page(&["1", "2"], false));

        state.prepend(c("42"));
        let ids: Vec<&str> = state.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["42", "1", "2"]);

        // Prepending an already-loaded id is a no-op.
        state.prepend(c("1"));
        assert_eq!(state.candidates.len(), 3);
    }
}

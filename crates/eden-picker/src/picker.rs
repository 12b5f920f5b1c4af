//! Async picker controller.
//!
//! `Picker` wires the pure state machine in `model` to a
//! `CandidateSource`. It owns the debounce timer, the generation
//! counter for stale-response rejection, and a `tokio::sync::watch`
//! channel that broadcasts a snapshot after every committed mutation.
//! Mutation = notification: state cannot change without subscribers
//! hearing about it.
//!
//! ## Ordering
//!
//! Every keystroke, open, close, and selection bumps the generation
//! under the state lock. A fetch captures the generation it was issued
//! under and commits only if that generation is still current, so the
//! most recently issued request always wins regardless of arrival
//! order. Superseded responses are discarded, not aborted - one wasted
//! round trip, no state corruption.
//!
//! ## Failure policy
//!
//! Fetch failures are logged and swallowed: the candidate list keeps
//! its previous contents and the loading flag clears. The picker is a
//! convenience widget; the user retries by typing again.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;

use eden_core::{Candidate, CandidateId};
use eden_source::CandidateSource;

use crate::keys::Key;
use crate::model::PickerPhase;
use crate::options::PickerOptions;

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable view of the picker, broadcast on every committed change.
///
/// Serializable so web-view style frontends can receive it as an
/// event payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PickerSnapshot {
    /// Whether the candidate panel is open.
    pub is_open: bool,

    /// Query text of the current open session (empty when closed).
    pub query: String,

    /// Text shown in the input field. After a selection this is the
    /// selected candidate's label until the user types again.
    pub display_text: String,

    /// Candidates in server order.
    pub candidates: Vec<Candidate>,

    /// Keyboard cursor, always valid or `None`.
    pub cursor: Option<usize>,

    /// Whether a fetch is pending.
    pub loading: bool,

    /// Whether "load more" would fetch anything.
    pub has_more: bool,

    /// Last committed page number (1-based, 0 before the first page).
    pub page: u32,

    /// Selection echoed from the embedding form.
    pub selection: Option<CandidateId>,
}

// =============================================================================
// Shared state
// =============================================================================

struct Shared {
    phase: PickerPhase,
    /// Text the user last typed. Survives close/reopen; cleared by a
    /// selection so the next session starts with a browse query.
    query_text: String,
    /// Text the input field shows (query text or selected label).
    display_text: String,
    /// Selection owned by the embedding form, echoed back via
    /// `set_selection`. The picker reads it, never decides it.
    selection: Option<CandidateId>,
    /// Bumped under this lock by every superseding action.
    generation: u64,
}

struct Inner {
    shared: Mutex<Shared>,
    tx: watch::Sender<PickerSnapshot>,
    rx: watch::Receiver<PickerSnapshot>,
}

impl Inner {
    fn snapshot_of(shared: &Shared) -> PickerSnapshot {
        match shared.phase.open() {
            Some(open) => PickerSnapshot {
                is_open: true,
                query: open.query.clone(),
                display_text: shared.display_text.clone(),
                candidates: open.candidates.clone(),
                cursor: open.cursor,
                loading: open.loading,
                has_more: open.has_more,
                page: open.page,
                selection: shared.selection.clone(),
            },
            None => PickerSnapshot {
                is_open: false,
                display_text: shared.display_text.clone(),
                selection: shared.selection.clone(),
                ..Default::default()
            },
        }
    }

    /// Mutate and broadcast.
    fn update<R>(&self, f: impl FnOnce(&mut Shared) -> R) -> R {
        let mut shared = self.shared.lock();
        let result = f(&mut shared);
        let _ = self.tx.send(Self::snapshot_of(&shared));
        result
    }

    /// Read without broadcasting.
    fn read<R>(&self, f: impl FnOnce(&Shared) -> R) -> R {
        f(&self.shared.lock())
    }

    /// Mutate and broadcast only if `token` is still the current
    /// generation. Returns whether the commit happened.
    fn commit_if_current<R>(
        &self,
        token: u64,
        f: impl FnOnce(&mut Shared) -> R,
    ) -> Option<R> {
        let mut shared = self.shared.lock();
        if shared.generation != token {
            tracing::trace!(token, current = shared.generation, "discarding stale response");
            return None;
        }
        let result = f(&mut shared);
        let _ = self.tx.send(Self::snapshot_of(&shared));
        Some(result)
    }
}

// =============================================================================
// Picker
// =============================================================================

/// A single-selection picker over a server-held candidate collection.
///
/// Cloning is cheap and clones share state, so a clone can be moved
/// into whatever task or callback drives it.
pub struct Picker<S: CandidateSource + 'static> {
    source: Arc<S>,
    options: PickerOptions,
    inner: Arc<Inner>,
}

impl<S: CandidateSource + 'static> Clone for Picker<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            options: self.options.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<S: CandidateSource + 'static> Picker<S> {
    /// Create a picker over the given source.
    pub fn new(source: Arc<S>, options: PickerOptions) -> Self {
        let shared = Shared {
            phase: PickerPhase::Closed,
            query_text: String::new(),
            display_text: String::new(),
            selection: options.initial_selection.clone(),
            generation: 0,
        };
        let (tx, rx) = watch::channel(Inner::snapshot_of(&shared));
        Self {
            source,
            options,
            inner: Arc::new(Inner {
                shared: Mutex::new(shared),
                tx,
                rx,
            }),
        }
    }

    /// Subscribe to snapshot broadcasts. Clone the receiver for
    /// multiple subscribers.
    pub fn subscribe(&self) -> watch::Receiver<PickerSnapshot> {
        self.inner.rx.clone()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> PickerSnapshot {
        self.inner.read(Inner::snapshot_of)
    }

    /// Placeholder text for the input field.
    pub fn placeholder(&self) -> &str {
        &self.options.placeholder
    }

    /// Whether stock badges should be rendered.
    pub fn show_quantity_badge(&self) -> bool {
        self.options.show_quantity_badge
    }

    /// Whether a row for this candidate is selectable.
    ///
    /// Out-of-stock candidates are disabled unless zero-quantity
    /// selection is allowed or the candidate is already the current
    /// selection (so an existing record stays editable).
    pub fn is_selectable(&self, candidate: &Candidate) -> bool {
        if !candidate.is_out_of_stock() || self.options.allow_zero_quantity {
            return true;
        }
        self.inner
            .read(|s| s.selection.as_ref().map(|id| id.as_ref() == candidate.id))
            .unwrap_or(false)
    }

    /// Echo the form-owned selection back into the picker.
    pub fn set_selection(&self, id: Option<CandidateId>) {
        self.inner.update(|s| s.selection = id);
    }

    // -------------------------------------------------------------------------
    // Panel lifecycle
    // -------------------------------------------------------------------------

    /// Open the panel and immediately fetch page 1 for the current
    /// query. No-op if already open.
    pub fn open(&self) {
        let issued = self.inner.update(|s| {
            if s.phase.is_open() {
                return None;
            }
            s.generation += 1;
            let mut open = crate::model::OpenState::new(s.query_text.clone());
            open.loading = true;
            s.phase = PickerPhase::Open(open);
            Some((s.generation, s.query_text.clone()))
        });

        if let Some((token, query)) = issued {
            tracing::debug!(%query, "panel opened, fetching page 1");
            self.spawn_search(token, query, None);
        }
    }

    /// Close the panel. Pending fetches are logically cancelled: their
    /// results will be discarded on arrival.
    pub fn close(&self) {
        self.inner.update(|s| {
            if s.phase.is_open() {
                s.generation += 1;
                s.phase = PickerPhase::Closed;
            }
        });
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a keystroke: the visible text updates immediately, the
    /// fetch is deferred by the debounce interval, and only the last
    /// keystroke inside the window actually fetches. Typing opens the
    /// panel if it was closed.
    pub fn input(&self, text: impl Into<String>) {
        let text = text.into();
        let token = self.inner.update(|s| {
            s.generation += 1;
            s.query_text = text.clone();
            s.display_text = text.clone();
            match s.phase.open_mut() {
                Some(open) => open.query = text.clone(),
                None => s.phase = PickerPhase::Open(crate::model::OpenState::new(text.clone())),
            }
            s.generation
        });

        self.spawn_search(token, text, Some(self.options.debounce));
    }

    /// Fetch and append the next page. No-op while loading, when no
    /// more pages exist, when the panel is closed, or when the
    /// displayed list was fetched for a query the user has since
    /// retyped (the pending debounced search will replace it).
    pub fn load_more(&self) {
        let issued = self.inner.update(|s| {
            let token = s.generation;
            let open = s.phase.open_mut()?;
            if open.loading || !open.has_more || !open.results_are_current() {
                return None;
            }
            open.loading = true;
            // Page numbers are 1-based; the first "load more" after a
            // committed page 1 requests page 2.
            Some((token, open.query.clone(), open.page + 1))
        });

        let Some((token, query, next_page)) = issued else {
            return;
        };

        tracing::debug!(page = next_page, "loading more candidates");
        let inner = self.inner.clone();
        let source = self.source.clone();
        let page_size = self.options.page_size;

        tokio::spawn(async move {
            let result = source
                .fetch_page(non_empty(&query), next_page, page_size)
                .await;

            match result {
                Ok(page) => {
                    inner.commit_if_current(token, |s| {
                        if let Some(open) = s.phase.open_mut() {
                            open.append(page);
                        }
                    });
                }
                Err(e) => {
                    tracing::debug!("load more failed: {}", e);
                    inner.commit_if_current(token, |s| {
                        if let Some(open) = s.phase.open_mut() {
                            open.loading = false;
                        }
                    });
                }
            }
        });
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Dispatch a key. Returns the selected candidate when the key
    /// completed a selection.
    pub fn key(&self, key: Key) -> Option<Candidate> {
        match key {
            Key::Up => {
                self.inner.update(|s| {
                    if let Some(open) = s.phase.open_mut() {
                        open.cursor_up();
                    }
                });
                None
            }
            Key::Down => {
                self.inner.update(|s| {
                    if let Some(open) = s.phase.open_mut() {
                        open.cursor_down();
                    }
                });
                None
            }
            Key::Enter => self.select_at_cursor(),
            Key::Escape => {
                self.close();
                None
            }
        }
    }

    /// Select the candidate under the cursor, if any.
    pub fn select_at_cursor(&self) -> Option<Candidate> {
        let index = self.inner.read(|s| s.phase.open().and_then(|o| o.cursor))?;
        self.select(index)
    }

    /// Select the candidate at `index` (the click path).
    ///
    /// Returns `None` for disabled rows and out-of-range indices.
    /// On success the panel closes and the input text becomes the
    /// candidate's label.
    pub fn select(&self, index: usize) -> Option<Candidate> {
        let candidate = self
            .inner
            .read(|s| s.phase.open().and_then(|o| o.candidates.get(index).cloned()))?;

        if !self.is_selectable(&candidate) {
            tracing::debug!(id = %candidate.id, "selection blocked: out of stock");
            return None;
        }

        self.inner.update(|s| {
            s.generation += 1;
            s.phase = PickerPhase::Closed;
            s.display_text = candidate.label.clone();
            s.query_text.clear();
        });

        tracing::debug!(id = %candidate.id, label = %candidate.label, "candidate selected");
        Some(candidate)
    }

    // -------------------------------------------------------------------------
    // Fetch plumbing
    // -------------------------------------------------------------------------

    /// Issue a page-1 search for `query` under `token`, optionally
    /// debounced. Commits only while `token` is current; after the
    /// commit, backfills the form's selection when a browse query did
    /// not surface it.
    fn spawn_search(&self, token: u64, query: String, debounce: Option<Duration>) {
        let inner = self.inner.clone();
        let source = self.source.clone();
        let page_size = self.options.page_size;

        tokio::spawn(async move {
            if let Some(delay) = debounce {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                // Superseded while waiting: never reaches the network.
                let committed = inner.commit_if_current(token, |s| {
                    if let Some(open) = s.phase.open_mut() {
                        open.loading = true;
                    }
                });
                if committed.is_none() {
                    return;
                }
            }

            let result = source.fetch_page(non_empty(&query), 1, page_size).await;

            let backfill = match result {
                Ok(page) => inner
                    .commit_if_current(token, |s| {
                        let open = s.phase.open_mut()?;
                        open.replace_with(page);
                        // A browse query with a selection not on page 1
                        // still needs the selected label on screen.
                        if query.is_empty() {
                            let selection = s.selection.clone()?;
                            let loaded = s
                                .phase
                                .open()
                                .is_some_and(|o| o.candidates.iter().any(|c| c.id == selection.as_ref()));
                            (!loaded).then_some(selection)
                        } else {
                            None
                        }
                    })
                    .flatten(),
                Err(e) => {
                    // Fail-soft: keep whatever was displayed, clear the
                    // spinner, let the user retry by typing.
                    tracing::debug!("search failed: {}", e);
                    inner.commit_if_current(token, |s| {
                        if let Some(open) = s.phase.open_mut() {
                            open.loading = false;
                        }
                    });
                    None
                }
            };

            if let Some(id) = backfill {
                match source.fetch_by_id(id.clone()).await {
                    Ok(candidate) => {
                        inner.commit_if_current(token, |s| {
                            if let Some(open) = s.phase.open_mut() {
                                open.prepend(candidate);
                            }
                        });
                    }
                    Err(e) => tracing::debug!(id = %id, "selection backfill failed: {}", e),
                }
            }
        });
    }
}

fn non_empty(query: &str) -> Option<String> {
    if query.is_empty() {
        None
    } else {
        Some(query.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================

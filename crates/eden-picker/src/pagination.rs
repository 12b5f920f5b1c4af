//! Stateless pagination control.
//!
//! `Pagination` is a pure function of its fields: the embedding
//! frontend rebuilds it on every render and asks it what to show and
//! whether a click does anything. It holds no internal state.

/// An entry in the rendered page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    /// A clickable page number.
    Page(u32),
    /// A gap in the strip.
    Ellipsis,
}

/// A click target on the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    First,
    Prev,
    Next,
    Last,
    Page(u32),
}

/// Compute the page-number window for the strip.
///
/// Up to five page numbers are shown. With more than five pages a
/// sliding window with ellipses keeps the strip compact:
/// near the start `1 2 3 4 ... N`, near the end `1 ... N-3 N-2 N-1 N`,
/// and in the middle `1 ... c-1 c c+1 ... N`.
pub fn page_window(current: u32, total: u32) -> Vec<PageEntry> {
    use PageEntry::{Ellipsis, Page};

    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= 5 {
        return (1..=total).map(Page).collect();
    }

    if current <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total)]
    } else if current >= total - 2 {
        vec![
            Page(1),
            Ellipsis,
            Page(total - 3),
            Page(total - 2),
            Page(total - 1),
            Page(total),
        ]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(total),
        ]
    }
}

/// Props for the pagination control.
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Current page, 1-based.
    pub current_page: u32,

    /// Total pages, at least 1.
    pub total_pages: u32,

    /// Total items across all pages.
    pub total_items: u64,

    /// Items per page.
    pub page_size: u32,

    /// Disables every control while a fetch is pending.
    pub loading: bool,

    /// Offered page sizes. Empty means the control cannot change the
    /// page size.
    pub page_size_options: Vec<u32>,
}

impl Pagination {
    /// Create a control without page-size switching.
    pub fn new(current_page: u32, total_pages: u32, total_items: u64, page_size: u32) -> Self {
        Self {
            current_page: current_page.max(1),
            total_pages: total_pages.max(1),
            total_items,
            page_size: page_size.max(1),
            loading: false,
            page_size_options: Vec::new(),
        }
    }

    pub fn with_page_size_options(mut self, options: Vec<u32>) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Whether the control renders at all.
    ///
    /// A single page with no page-size switching is a useless strip;
    /// render nothing.
    pub fn is_hidden(&self) -> bool {
        self.total_pages <= 1 && self.page_size_options.is_empty()
    }

    /// The page-number window for the strip.
    pub fn window(&self) -> Vec<PageEntry> {
        page_window(self.current_page, self.total_pages)
    }

    /// The 1-based item range shown on the current page, for a
    /// "showing x-y of z" caption. `(0, 0)` when there are no items.
    pub fn item_range(&self) -> (u64, u64) {
        if self.total_items == 0 {
            return (0, 0);
        }
        let start =
            u64::from(self.current_page.saturating_sub(1)) * u64::from(self.page_size) + 1;
        let end = (start + u64::from(self.page_size) - 1).min(self.total_items);
        (start.min(self.total_items), end)
    }

    /// Resolve a click into a page change.
    ///
    /// Returns `None` when the click lands on a disabled control: any
    /// click while loading, a boundary arrow at its boundary, a page
    /// number out of range, or the current page itself.
    pub fn page_for(&self, target: PageTarget) -> Option<u32> {
        if self.loading {
            return None;
        }

        let page = match target {
            PageTarget::First => 1,
            PageTarget::Prev => self.current_page.saturating_sub(1).max(1),
            PageTarget::Next => (self.current_page + 1).min(self.total_pages),
            PageTarget::Last => self.total_pages,
            PageTarget::Page(p) => {
                if p < 1 || p > self.total_pages {
                    return None;
                }
                p
            }
        };

        (page != self.current_page).then_some(page)
    }

    /// Resolve a page-size selection.
    ///
    /// Returns `None` while loading, for sizes not offered, or when
    /// the size is already active.
    pub fn page_size_for(&self, size: u32) -> Option<u32> {
        if self.loading || !self.page_size_options.contains(&size) {
            return None;
        }
        (size != self.page_size).then_some(size)
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Entry list view: virtualized rows, selection visibility, scroll thumb.
//!
//! The view renders exactly the items the engine supplied — windowing the
//! full match set is the engine's job, so there is no pagination here. Rows
//! have uneven extents (an item with subtext occupies two rows), which is why
//! scroll arithmetic works on summed extents rather than item counts.
//!
//! Scrolling on selection is minimal-motion: if the selected item's bottom
//! edge sticks out below the viewport, scroll down by exactly that overflow;
//! if its top edge is above, scroll up by exactly that amount; otherwise
//! leave the offset alone. Re-selecting an already visible item is a no-op.

use core_events::Item;
use tracing::trace;

pub mod status;
pub mod style;
pub mod theme;

pub use status::StatusLine;
pub use style::{Row, RowSpan, SpanKind};
pub use theme::ThemeVars;

/// Scroll thumb geometry in percent of the track, mirroring the classic
/// `100 * visible / total` formulas. Hidden whenever content fits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollThumb {
    pub visible: bool,
    pub top_pct: f64,
    pub height_pct: f64,
}

impl ScrollThumb {
    const HIDDEN: ScrollThumb = ScrollThumb {
        visible: false,
        top_pct: 0.0,
        height_pct: 0.0,
    };
}

#[derive(Debug, Default)]
pub struct EntryListView {
    items: Vec<Item>,
    selected: Option<usize>,
    /// Scroll offset in row units.
    offset: usize,
    /// Viewport height in row units.
    viewport_rows: usize,
    filtered: u64,
    total: u64,
}

/// Rows occupied by one item: the title line, plus a subtext line.
pub fn item_extent(item: &Item) -> usize {
    1 + item.data.subtext.is_some() as usize
}

impl EntryListView {
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            viewport_rows,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn counters(&self) -> (u64, u64) {
        (self.filtered, self.total)
    }

    pub fn total_extent(&self) -> usize {
        self.items.iter().map(item_extent).sum()
    }

    fn item_top(&self, index: usize) -> usize {
        self.items[..index].iter().map(item_extent).sum()
    }

    fn max_offset(&self) -> usize {
        self.total_extent().saturating_sub(self.viewport_rows)
    }

    /// Resize the viewport, keeping the offset in range.
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows;
        self.offset = self.offset.min(self.max_offset());
    }

    /// External scroll (wheel, drag): clamped, selection untouched.
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
    }

    /// Replace the rendered set with a fresh filter result. The selection
    /// marker comes from the items' own `selected` flags; the scroll offset
    /// is preserved but clamped to the new content height.
    pub fn update(&mut self, filtered: u64, total: u64, items: Vec<Item>) {
        self.selected = items.iter().position(|item| item.selected);
        self.items = items;
        self.filtered = filtered;
        self.total = total;
        self.offset = self.offset.min(self.max_offset());
        trace!(
            target: "render.list",
            items = self.items.len(),
            filtered,
            total,
            "list_updated"
        );
    }

    /// Move the selection marker, scrolling the minimum distance needed to
    /// bring the item's full extent into view. Out-of-range indices clear
    /// the marker.
    pub fn select(&mut self, index: usize) {
        if self.selected == Some(index) {
            return;
        }
        if index >= self.items.len() {
            self.selected = None;
            return;
        }
        self.selected = Some(index);
        self.ensure_visible(index);
    }

    fn ensure_visible(&mut self, index: usize) {
        let top = self.item_top(index) as isize - self.offset as isize;
        let bottom = top + item_extent(&self.items[index]) as isize - self.viewport_rows as isize;
        let delta = if bottom >= 0 {
            bottom
        } else if top < 0 {
            top
        } else {
            0
        };
        let next = self.offset as isize + delta;
        self.offset = next.max(0) as usize;
        if delta != 0 {
            trace!(target: "render.list", index, delta, offset = self.offset, "scrolled_to_selection");
        }
    }

    pub fn thumb(&self) -> ScrollThumb {
        let total = self.total_extent();
        if total <= self.viewport_rows {
            return ScrollThumb::HIDDEN;
        }
        ScrollThumb {
            visible: true,
            top_pct: 100.0 * self.offset as f64 / total as f64,
            height_pct: 100.0 * self.viewport_rows as f64 / total as f64,
        }
    }

    /// Materialize the visible render model.
    pub fn rows(&self) -> Vec<Row> {
        style::render_rows(&self.items, self.selected)
    }
}

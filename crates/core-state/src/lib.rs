//! Widget state: prompt flags, pick-history cursor, edit undo history, and
//! the session phase machine.
//!
//! This crate is deliberately presentation-free: everything here is plain
//! state mutated synchronously by the dispatcher in `core-model` and read by
//! `core-render`. The engine owns the actual picked-value history; all the
//! widget keeps is the `{index, value}` cursor it echoes back on traversal
//! requests.

pub mod undo;

pub use undo::{EDIT_HISTORY_MAX, EditHistory, EditSnapshot};

use tracing::debug;

/// Prompt mode: normal typing vs. replaying engine history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
    #[default]
    Insert,
    History,
}

/// Derived prompt flags. No algorithmic content: these are set from filter
/// results and rendered by the status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptState {
    pub mode: PromptMode,
    /// A request is in flight or scheduled.
    pub busy: bool,
    /// The last filter pass matched nothing.
    pub not_found: bool,
    /// More entries matched than the engine was willing to send.
    pub over_limit: bool,
}

impl PromptState {
    pub fn set_insert_mode(&mut self) {
        self.mode = PromptMode::Insert;
    }

    pub fn set_history_mode(&mut self) {
        self.mode = PromptMode::History;
    }

    /// Fold a filter result into the flags. An empty item list is a normal
    /// outcome surfaced as `not_found`, never an error.
    pub fn apply_result(&mut self, filtered: u64, _total: u64, items_len: usize) {
        self.not_found = items_len == 0;
        self.over_limit = filtered > items_len as u64;
    }
}

/// Cursor over the engine-owned history of previously accepted inputs.
///
/// Reset to `{-1, current_text}` on every ordinary edit; overwritten whenever
/// the engine answers a traversal request with `history(index, value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickHistoryState {
    pub index: i64,
    pub value: String,
}

impl Default for PickHistoryState {
    fn default() -> Self {
        Self {
            index: -1,
            value: String::new(),
        }
    }
}

impl PickHistoryState {
    pub fn reset(&mut self, current_text: &str) {
        self.index = -1;
        self.value = current_text.to_string();
    }

    pub fn set(&mut self, index: i64, value: &str) {
        self.index = index;
        self.value = value.to_string();
    }
}

/// Whole-widget lifecycle. `Picked` is terminal for a session: the widget
/// stays unresponsive until the engine delivers the next setup payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Ready,
    Picked,
}

impl Phase {
    pub fn is_ready(self) -> bool {
        matches!(self, Phase::Ready)
    }

    /// Setup payload applied: the widget accepts edits and filter traffic.
    pub fn on_setup(&mut self) {
        debug!(target: "state.phase", from = ?self, "ready");
        *self = Phase::Ready;
    }

    /// A pick ended the session; edits are no-ops until the next setup.
    pub fn on_picked(&mut self) {
        debug!(target: "state.phase", from = ?self, "picked");
        *self = Phase::Picked;
    }
}

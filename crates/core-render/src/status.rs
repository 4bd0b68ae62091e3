//! Prompt/status line assembly.
//!
//! Presentation model only: state lives in `core-state`, this module just
//! shapes it for whatever host draws the prompt box.

use core_state::{PromptMode, PromptState};

pub const INSERT_GLYPH: char = '▸';
pub const HISTORY_GLYPH: char = '◂';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub glyph: char,
    /// `filtered/total`, e.g. `3/100`.
    pub counters: String,
    pub busy: bool,
    pub not_found: bool,
    pub over_limit: bool,
}

pub fn status_line(prompt: &PromptState, filtered: u64, total: u64) -> StatusLine {
    StatusLine {
        glyph: match prompt.mode {
            PromptMode::Insert => INSERT_GLYPH,
            PromptMode::History => HISTORY_GLYPH,
        },
        counters: format!("{filtered}/{total}"),
        busy: prompt.busy,
        not_found: prompt.not_found,
        over_limit: prompt.over_limit,
    }
}

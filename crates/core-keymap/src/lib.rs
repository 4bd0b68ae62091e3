//! core-keymap: chord to menu-command resolution.
//!
//! Design principles:
//! - Pure and deterministic: resolution depends only on the binding table
//!   and the incoming token.
//! - No side effects: logging only at TRACE for lookups.
//! - A resolved chord is always swallowed by the caller (default input-field
//!   behavior suppressed); an unresolved printable char falls through to
//!   text insertion.
//!
//! Chords here are single tokens, never sequences, so the table is a small
//! flat list instead of a trie; with two dozen bindings a linear scan beats
//! any hashing setup cost.

use core_events::{KeyToken, ModMask, NamedKey};
use smallvec::SmallVec;
use tracing::trace;

/// Commands the widget can execute. These are keyboard-surface level; the
/// dispatcher in `core-model` decides what each one means for buffer, engine,
/// and histories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    AcceptSelected,
    AcceptInput,
    Dismiss,
    Complete,
    Refresh,
    JumpHome,
    SelectNext,
    SelectPrev,
    ReplaceWithSelection,
    HistoryNext,
    HistoryPrev,
    ClearInput,
    EraseWord,
    EraseBigWord,
    Undo,
    Redo,
    AlternatePattern,
}

#[derive(Debug, Clone)]
struct Binding {
    token: KeyToken,
    command: MenuCommand,
}

/// Immutable-after-setup binding table.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: SmallVec<[Binding; 24]>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::standard()
    }
}

fn ctrl(c: char) -> KeyToken {
    KeyToken::ctrl(KeyToken::Char(c))
}

impl Keymap {
    pub fn empty() -> Self {
        Self {
            bindings: SmallVec::new(),
        }
    }

    /// The default keyboard surface of the widget.
    pub fn standard() -> Self {
        let mut map = Self::empty();
        map.bind(KeyToken::Named(NamedKey::Enter), MenuCommand::AcceptSelected);
        map.bind(KeyToken::Named(NamedKey::Esc), MenuCommand::Dismiss);
        map.bind(ctrl(' '), MenuCommand::Dismiss);
        map.bind(ctrl('d'), MenuCommand::Dismiss);
        map.bind(KeyToken::Named(NamedKey::Tab), MenuCommand::Complete);
        map.bind(KeyToken::Named(NamedKey::F(5)), MenuCommand::Refresh);
        map.bind(ctrl('r'), MenuCommand::Refresh);
        map.bind(
            KeyToken::ctrl(KeyToken::Named(NamedKey::Enter)),
            MenuCommand::AcceptInput,
        );
        map.bind(ctrl('h'), MenuCommand::JumpHome);
        map.bind(ctrl('j'), MenuCommand::SelectNext);
        map.bind(ctrl('k'), MenuCommand::SelectPrev);
        map.bind(ctrl('m'), MenuCommand::ReplaceWithSelection);
        map.bind(ctrl('n'), MenuCommand::HistoryNext);
        map.bind(ctrl('p'), MenuCommand::HistoryPrev);
        map.bind(ctrl('u'), MenuCommand::ClearInput);
        map.bind(ctrl('w'), MenuCommand::EraseWord);
        map.bind(
            KeyToken::ctrl(KeyToken::Named(NamedKey::Backspace)),
            MenuCommand::EraseBigWord,
        );
        map.bind(ctrl('y'), MenuCommand::Redo);
        map.bind(ctrl('z'), MenuCommand::Undo);
        map.bind(KeyToken::alt(KeyToken::Char('p')), MenuCommand::AlternatePattern);
        map
    }

    /// Bind a chord, replacing any existing binding for the same token.
    pub fn bind(&mut self, token: KeyToken, command: MenuCommand) {
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.token == token) {
            existing.command = command;
            return;
        }
        self.bindings.push(Binding { token, command });
    }

    /// Resolve a token to a command. `Some` means the caller must suppress
    /// any default handling for the key.
    pub fn resolve(&self, token: &KeyToken) -> Option<MenuCommand> {
        let command = self
            .bindings
            .iter()
            .find(|b| b.token == *token)
            .map(|b| b.command);
        trace!(target: "keymap", token = %token, resolved = ?command, "resolve");
        command
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// True when a token should be treated as plain text insertion: an unmodified
/// (or shift-only) printable character that no binding claimed.
pub fn is_text_input(token: &KeyToken) -> bool {
    match token {
        KeyToken::Char(c) => !c.is_control(),
        KeyToken::Chord { base, mods } => {
            mods.difference(ModMask::SHIFT).is_empty() && is_text_input(base)
        }
        KeyToken::Named(_) => false,
    }
}

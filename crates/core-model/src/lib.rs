//! The menu widget: one state machine over buffer, histories, coordinator,
//! and list view.
//!
//! Every externally visible change flows through [`MenuWidget::handle`] as an
//! [`Event`] and comes back out as a list of [`Effect`]s — engine commands to
//! forward and debounce timers to arrange. All mutation happens synchronously
//! inside `handle` on the caller's thread; there is no interior concurrency,
//! so the concurrency story reduces to "no re-entrant handling".
//!
//! Session lifecycle (`Phase`): the widget comes up unresponsive, becomes
//! ready when the engine pushes its setup payload, and goes quiet again after
//! a pick until the next setup. Buffer edits are accepted while not ready
//! (the setup payload prepends its configured input to whatever was typed
//! early), but no filter traffic flows.

use std::time::Duration;

use core_config::{DebounceConfig, SetupParams, parse_setup};
use core_events::{EngineCommand, EnginePush, Event, KeyToken, NamedKey};
use core_filter::{Directive, FilterCoordinator, NotifyKind};
use core_keymap::{Keymap, MenuCommand, is_text_input};
use core_render::{EntryListView, StatusLine, ThemeVars, status};
use core_state::{EditHistory, EditSnapshot, Phase, PickHistoryState, PromptState};
use core_text::{InputBuffer, boundary};
use tracing::{debug, trace};

pub mod runtime;

pub use runtime::{EngineBridge, MenuRuntime};

/// Side effects of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Forward this command to the matching engine.
    Engine(EngineCommand),
    /// Arrange a one-shot debounce timer delivering
    /// `Event::DebounceElapsed(generation)` after `delay`.
    Schedule { generation: u64, delay: Duration },
}

#[derive(Debug)]
pub struct MenuWidget {
    input: InputBuffer,
    edit_history: EditHistory,
    pick_history: PickHistoryState,
    prompt: PromptState,
    phase: Phase,
    coordinator: FilterCoordinator,
    list: EntryListView,
    keymap: Keymap,
    params: SetupParams,
    /// Last `selected` push from the engine; target of replace-with-selection.
    selection: Option<(usize, String)>,
    theme: ThemeVars,
}

impl Default for MenuWidget {
    fn default() -> Self {
        Self::new(Keymap::standard(), DebounceConfig::default(), 10)
    }
}

impl MenuWidget {
    pub fn new(keymap: Keymap, debounce: DebounceConfig, viewport_rows: usize) -> Self {
        Self {
            input: InputBuffer::new(),
            edit_history: EditHistory::new(),
            pick_history: PickHistoryState::default(),
            prompt: PromptState::default(),
            phase: Phase::default(),
            coordinator: FilterCoordinator::new(debounce.into()),
            list: EntryListView::new(viewport_rows),
            keymap,
            params: SetupParams::default(),
            selection: None,
            theme: ThemeVars::new(),
        }
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn list(&self) -> &EntryListView {
        &self.list
    }

    pub fn prompt(&self) -> &PromptState {
        &self.prompt
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn theme(&self) -> &ThemeVars {
        &self.theme
    }

    pub fn params(&self) -> &SetupParams {
        &self.params
    }

    /// Current prompt/status presentation model.
    pub fn status_line(&self) -> StatusLine {
        let (filtered, total) = self.list.counters();
        status::status_line(&self.prompt, filtered, total)
    }

    /// Feed one event through the state machine.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Key(token) => self.handle_key(token),
            Event::Engine(push) => self.apply_push(push),
            Event::DebounceElapsed(generation) => self
                .coordinator
                .on_timer(generation)
                .map(|command| vec![Effect::Engine(command)])
                .unwrap_or_default(),
            Event::Shutdown => Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Keyboard dispatch
    // ---------------------------------------------------------------------

    fn handle_key(&mut self, token: KeyToken) -> Vec<Effect> {
        if let Some(command) = self.keymap.resolve(&token) {
            trace!(target: "model.dispatch", ?command, "menu_command");
            return self.dispatch(command);
        }
        if is_text_input(&token)
            && let Some(c) = text_char(&token)
        {
            return self.user_edit(|input| input.insert_str(&c.to_string()));
        }
        match token {
            KeyToken::Named(NamedKey::Backspace) => self.user_edit(|input| {
                input.backspace();
            }),
            KeyToken::Named(NamedKey::Left) => {
                self.input.move_left();
                Vec::new()
            }
            KeyToken::Named(NamedKey::Right) => {
                self.input.move_right();
                Vec::new()
            }
            KeyToken::Named(NamedKey::Home) => {
                self.input.move_line_start();
                Vec::new()
            }
            KeyToken::Named(NamedKey::End) => {
                self.input.move_line_end();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn dispatch(&mut self, command: MenuCommand) -> Vec<Effect> {
        match command {
            MenuCommand::AcceptSelected => vec![Effect::Engine(EngineCommand::AcceptSelected)],
            MenuCommand::Dismiss => vec![Effect::Engine(EngineCommand::Dismiss)],
            MenuCommand::AcceptInput => vec![Effect::Engine(EngineCommand::AcceptInput {
                text: self.input.text().to_string(),
            })],
            MenuCommand::SelectNext => vec![Effect::Engine(EngineCommand::SelectNext)],
            MenuCommand::SelectPrev => vec![Effect::Engine(EngineCommand::SelectPrev)],
            MenuCommand::Complete => self.notify(true, NotifyKind::Complete),
            MenuCommand::Refresh => self.notify(true, NotifyKind::Refresh),
            MenuCommand::JumpHome => {
                if self.params.home_input.is_empty() {
                    return Vec::new();
                }
                let home = self.params.home_input.clone();
                self.user_edit(|input| input.set_text(home))
            }
            MenuCommand::ReplaceWithSelection => {
                let Some((_, value)) = self.selection.clone() else {
                    return Vec::new();
                };
                self.programmatic_edit(|input| input.set_text(value))
            }
            MenuCommand::HistoryPrev => {
                vec![Effect::Engine(EngineCommand::RequestPrevFromHistory {
                    index: self.pick_history.index,
                    value: self.pick_history.value.clone(),
                })]
            }
            MenuCommand::HistoryNext => {
                vec![Effect::Engine(EngineCommand::RequestNextFromHistory {
                    index: self.pick_history.index,
                    value: self.pick_history.value.clone(),
                })]
            }
            MenuCommand::ClearInput => self.user_edit(|input| input.set_text("")),
            MenuCommand::EraseWord => {
                let replacement = boundary::erase_word(
                    self.input.text(),
                    self.input.cursor(),
                    &self.params.delimiters,
                );
                self.apply_replacement(replacement)
            }
            MenuCommand::EraseBigWord => {
                let replacement = boundary::erase_big_word(
                    self.input.text(),
                    self.input.cursor(),
                    &self.params.big_delimiters,
                );
                self.apply_replacement(replacement)
            }
            MenuCommand::AlternatePattern => {
                let replacement = boundary::alternate_pattern(
                    self.input.text(),
                    self.input.cursor(),
                    &self.params.pattern_types,
                );
                self.apply_replacement(replacement)
            }
            MenuCommand::Undo => match self.edit_history.undo() {
                Some(snapshot) => {
                    let snapshot = snapshot.clone();
                    self.replay(&snapshot)
                }
                None => Vec::new(),
            },
            MenuCommand::Redo => match self.edit_history.redo() {
                Some(snapshot) => {
                    let snapshot = snapshot.clone();
                    self.replay(&snapshot)
                }
                None => Vec::new(),
            },
        }
    }

    // ---------------------------------------------------------------------
    // Edit plumbing
    // ---------------------------------------------------------------------

    fn snapshot(&self) -> EditSnapshot {
        EditSnapshot::new(self.input.text(), self.input.cursor())
    }

    /// Mutate the buffer as a user edit: push undo history, then notify the
    /// coordinator (resetting pick-history state and forcing insert mode).
    fn user_edit(&mut self, mutate: impl FnOnce(&mut InputBuffer)) -> Vec<Effect> {
        self.edit(mutate, true)
    }

    /// Mutate the buffer programmatically: the edit is undoable, but does not
    /// reset pick-history state (used by history/selection replays).
    fn programmatic_edit(&mut self, mutate: impl FnOnce(&mut InputBuffer)) -> Vec<Effect> {
        self.edit(mutate, false)
    }

    fn edit(&mut self, mutate: impl FnOnce(&mut InputBuffer), is_user_edit: bool) -> Vec<Effect> {
        let old = self.snapshot();
        mutate(&mut self.input);
        let new = self.snapshot();
        if old.text == new.text {
            // Nothing visible changed (backspace at the start, clear on an
            // already empty line): no snapshot, no engine traffic.
            return Vec::new();
        }
        self.edit_history.push(old, new);
        self.notify(is_user_edit, NotifyKind::Filter)
    }

    fn apply_replacement(&mut self, replacement: Option<boundary::Replacement>) -> Vec<Effect> {
        match replacement {
            Some(replacement) => self.user_edit(|input| input.apply(&replacement)),
            None => Vec::new(),
        }
    }

    /// Re-apply an undo/redo snapshot. Replaying is not an edit: nothing is
    /// pushed, and pick-history state stays put.
    fn replay(&mut self, snapshot: &EditSnapshot) -> Vec<Effect> {
        self.input.set_text(snapshot.text.clone());
        self.input.set_cursor(snapshot.cursor);
        self.notify(false, NotifyKind::Filter)
    }

    /// Tell the coordinator the text changed. No-op while not ready.
    fn notify(&mut self, is_user_edit: bool, kind: NotifyKind) -> Vec<Effect> {
        if !self.coordinator.is_ready() {
            return Vec::new();
        }
        self.prompt.busy = true;
        if is_user_edit {
            self.pick_history.reset(self.input.text());
            self.prompt.set_insert_mode();
        }
        let text = self.input.text().to_string();
        match self.coordinator.notify_edit(&text, kind) {
            Some(Directive::Send(command)) => vec![Effect::Engine(command)],
            Some(Directive::Schedule { generation, delay }) => {
                vec![Effect::Schedule { generation, delay }]
            }
            None => Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Engine pushes
    // ---------------------------------------------------------------------

    fn apply_push(&mut self, push: EnginePush) -> Vec<Effect> {
        match push {
            EnginePush::Setup { payload } => {
                self.params = parse_setup(&payload);
                debug!(
                    target: "model.dispatch",
                    delimiters = self.params.delimiters.len(),
                    patterns = self.params.pattern_types.len(),
                    "setup_applied"
                );
                // Anything typed before readiness survives, appended to the
                // configured initial input.
                let text = format!("{}{}", self.params.input, self.input.text());
                self.input.set_text(text);
                self.phase.on_setup();
                self.coordinator.set_ready();
                self.notify(true, NotifyKind::Filter)
            }
            EnginePush::Selected { index, value } => {
                self.selection = Some((index, value));
                self.list.select(index);
                Vec::new()
            }
            EnginePush::Filtered {
                seq,
                filtered,
                total,
                items,
            } => {
                match self.coordinator.on_result(seq, filtered, total, items) {
                    Some(update) => {
                        self.prompt.busy = false;
                        self.prompt
                            .apply_result(update.filtered, update.total, update.items.len());
                        self.list.update(update.filtered, update.total, update.items);
                    }
                    None => {
                        // Stale: a newer request is in flight; the view and
                        // the busy indicator stay as they are.
                    }
                }
                Vec::new()
            }
            EnginePush::History { index, value } => {
                self.pick_history.set(index, &value);
                self.prompt.set_history_mode();
                // A history replay is not an edit: no undo push, and the
                // pick-history cursor must survive the filter pass.
                self.input.set_text(value);
                self.notify(false, NotifyKind::Filter)
            }
            EnginePush::Completed { text } => {
                let effects = self.user_edit(|input| input.set_text(text));
                self.prompt.busy = false;
                effects
            }
            EnginePush::Picked => {
                self.input.clear();
                self.phase.on_picked();
                self.coordinator.picked();
                self.prompt.busy = false;
                Vec::new()
            }
            EnginePush::Themed { vars } => {
                self.theme.apply(vars);
                Vec::new()
            }
        }
    }
}

/// The char a text-input token inserts.
fn text_char(token: &KeyToken) -> Option<char> {
    match token {
        KeyToken::Char(c) => Some(*c),
        KeyToken::Chord { base, .. } => text_char(base),
        KeyToken::Named(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::ModMask;
    use pretty_assertions::assert_eq;

    fn setup_event(payload: &str) -> Event {
        Event::Engine(EnginePush::Setup {
            payload: payload.to_string(),
        })
    }

    fn type_str(widget: &mut MenuWidget, text: &str) -> Vec<Effect> {
        let mut effects = Vec::new();
        for c in text.chars() {
            effects.extend(widget.handle(Event::Key(KeyToken::Char(c))));
        }
        effects
    }

    fn ready_widget() -> MenuWidget {
        let mut widget = MenuWidget::default();
        let effects = widget.handle(setup_event("{}"));
        // Drain the setup debounce so later tests start from a clean window.
        for effect in effects {
            if let Effect::Schedule { generation, .. } = effect {
                widget.handle(Event::DebounceElapsed(generation));
            }
        }
        widget
    }

    fn single_schedule(effects: &[Effect]) -> u64 {
        let schedules: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Schedule { generation, .. } => Some(*generation),
                _ => None,
            })
            .collect();
        assert_eq!(schedules.len(), 1, "expected exactly one schedule");
        schedules[0]
    }

    #[test]
    fn edits_before_setup_produce_no_traffic() {
        let mut widget = MenuWidget::default();
        let effects = type_str(&mut widget, "abc");
        assert_eq!(effects, Vec::new());
        assert_eq!(widget.input().text(), "abc");
        assert!(!widget.prompt().busy);
    }

    #[test]
    fn setup_prepends_configured_input_to_early_typing() {
        let mut widget = MenuWidget::default();
        type_str(&mut widget, "xyz");
        widget.handle(setup_event(r#"{"input": "src/"}"#));
        assert_eq!(widget.input().text(), "src/xyz");
        assert!(widget.phase().is_ready());
    }

    #[test]
    fn typing_burst_schedules_once_and_sends_last_text() {
        let mut widget = ready_widget();
        let effects = type_str(&mut widget, "abc");
        let generation = single_schedule(&effects);
        let sent = widget.handle(Event::DebounceElapsed(generation));
        assert_eq!(
            sent,
            vec![Effect::Engine(EngineCommand::Filter {
                seq: 1, // seq 0 was the setup-triggered pass
                text: "abc".into()
            })]
        );
    }

    #[test]
    fn backspace_is_an_undoable_user_edit() {
        let mut widget = ready_widget();
        type_str(&mut widget, "ab");
        widget.handle(Event::Key(KeyToken::Named(NamedKey::Backspace)));
        assert_eq!(widget.input().text(), "a");
        widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('z'))));
        assert_eq!(widget.input().text(), "ab");
    }

    #[test]
    fn undo_redo_replay_without_new_snapshots() {
        let mut widget = ready_widget();
        type_str(&mut widget, "ab");
        widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('z'))));
        assert_eq!(widget.input().text(), "a");
        widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('y'))));
        assert_eq!(widget.input().text(), "ab");
        // Round trip again: replays did not grow the history.
        widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('z'))));
        assert_eq!(widget.input().text(), "a");
    }

    #[test]
    fn undo_at_stack_bottom_is_completely_silent() {
        let mut widget = ready_widget();
        let effects = widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('z'))));
        assert_eq!(effects, Vec::new());
    }

    #[test]
    fn erase_word_uses_session_delimiters() {
        let mut widget = MenuWidget::default();
        widget.handle(setup_event(r#"{"delimiters": ["/", "."]}"#));
        type_str(&mut widget, "foo/bar.baz");
        widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('w'))));
        assert_eq!(widget.input().text(), "foo/bar.");
        assert_eq!(widget.input().cursor(), 8);
    }

    #[test]
    fn alternate_pattern_cycles_under_alt_p() {
        let mut widget = MenuWidget::default();
        widget.handle(setup_event(r#"{"pattern_types": ["@*", "@/"]}"#));
        type_str(&mut widget, "term");
        let alt_p = Event::Key(KeyToken::alt(KeyToken::Char('p')));
        widget.handle(alt_p.clone());
        assert_eq!(widget.input().text(), "@*term");
        widget.handle(alt_p.clone());
        assert_eq!(widget.input().text(), "@/term");
        widget.handle(alt_p);
        assert_eq!(widget.input().text(), "term");
    }

    #[test]
    fn stale_filtered_push_leaves_view_untouched() {
        let mut widget = ready_widget();
        // Two requests in flight: seq 1 superseded by seq 2.
        for text in ["a", "ab"] {
            let effects = type_str(&mut widget, &text[text.len() - 1..]);
            let generation = single_schedule(&effects);
            widget.handle(Event::DebounceElapsed(generation));
        }
        let stale = EnginePush::Filtered {
            seq: 1,
            filtered: 50,
            total: 100,
            items: vec![core_events::Item::default()],
        };
        widget.handle(Event::Engine(stale));
        assert_eq!(widget.list().items().len(), 0);
        assert!(widget.prompt().busy, "stale result must not clear busy");

        let current = EnginePush::Filtered {
            seq: 2,
            filtered: 1,
            total: 100,
            items: vec![core_events::Item::default()],
        };
        widget.handle(Event::Engine(current));
        assert_eq!(widget.list().items().len(), 1);
        assert!(!widget.prompt().busy);
    }

    #[test]
    fn history_push_enters_history_mode_without_undo_snapshot() {
        let mut widget = ready_widget();
        type_str(&mut widget, "ty");
        widget.handle(Event::Engine(EnginePush::History {
            index: 0,
            value: "typed before".into(),
        }));
        assert_eq!(widget.input().text(), "typed before");
        assert_eq!(
            widget.status_line().glyph,
            core_render::status::HISTORY_GLYPH
        );
        // Undo skips the history write and lands on the last real edit.
        widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('z'))));
        assert_eq!(widget.input().text(), "t");
    }

    #[test]
    fn history_traversal_echoes_cursor_state() {
        let mut widget = ready_widget();
        type_str(&mut widget, "ab");
        let effects = widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('p'))));
        assert_eq!(
            effects,
            vec![Effect::Engine(EngineCommand::RequestPrevFromHistory {
                index: -1,
                value: "ab".into()
            })]
        );
        widget.handle(Event::Engine(EnginePush::History {
            index: 3,
            value: "older".into(),
        }));
        let effects = widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('p'))));
        assert_eq!(
            effects,
            vec![Effect::Engine(EngineCommand::RequestPrevFromHistory {
                index: 3,
                value: "older".into()
            })]
        );
    }

    #[test]
    fn user_edit_resets_history_state_and_mode() {
        let mut widget = ready_widget();
        widget.handle(Event::Engine(EnginePush::History {
            index: 2,
            value: "older".into(),
        }));
        assert_eq!(
            widget.status_line().glyph,
            core_render::status::HISTORY_GLYPH
        );
        type_str(&mut widget, "x");
        assert_eq!(widget.status_line().glyph, core_render::status::INSERT_GLYPH);
        let effects = widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('n'))));
        assert_eq!(
            effects,
            vec![Effect::Engine(EngineCommand::RequestNextFromHistory {
                index: -1,
                value: "olderx".into()
            })]
        );
    }

    #[test]
    fn tab_completes_immediately_cancelling_debounce() {
        let mut widget = ready_widget();
        let effects = type_str(&mut widget, "par");
        let generation = single_schedule(&effects);
        let effects = widget.handle(Event::Key(KeyToken::Named(NamedKey::Tab)));
        assert_eq!(
            effects,
            vec![Effect::Engine(EngineCommand::Complete { text: "par".into() })]
        );
        // The cancelled window is dead.
        assert_eq!(widget.handle(Event::DebounceElapsed(generation)), Vec::new());
    }

    #[test]
    fn completed_push_sets_text_and_refilters() {
        let mut widget = ready_widget();
        let effects = type_str(&mut widget, "par");
        widget.handle(Event::DebounceElapsed(single_schedule(&effects)));
        let effects = widget.handle(Event::Engine(EnginePush::Completed {
            text: "parser/".into(),
        }));
        assert_eq!(widget.input().text(), "parser/");
        single_schedule(&effects);
        assert!(!widget.prompt().busy);
    }

    #[test]
    fn replace_with_selection_needs_a_selection_push() {
        let mut widget = ready_widget();
        assert_eq!(
            widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('m')))),
            Vec::new()
        );
        widget.handle(Event::Engine(EnginePush::Selected {
            index: 0,
            value: "picked value".into(),
        }));
        widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('m'))));
        assert_eq!(widget.input().text(), "picked value");
    }

    #[test]
    fn jump_home_requires_configured_home() {
        let mut widget = ready_widget();
        assert_eq!(
            widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('h')))),
            Vec::new()
        );

        let mut widget = MenuWidget::default();
        widget.handle(setup_event(r#"{"home_input": "~/projects"}"#));
        widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Char('h'))));
        assert_eq!(widget.input().text(), "~/projects");
    }

    #[test]
    fn picked_clears_and_quiets_until_next_setup() {
        let mut widget = ready_widget();
        type_str(&mut widget, "abc");
        widget.handle(Event::Engine(EnginePush::Picked));
        assert_eq!(widget.input().text(), "");
        assert!(!widget.phase().is_ready());
        assert_eq!(type_str(&mut widget, "zz"), Vec::new());
        // Reuse: next setup payload brings the widget back.
        let effects = widget.handle(setup_event("{}"));
        assert!(widget.phase().is_ready());
        single_schedule(&effects);
        assert_eq!(widget.input().text(), "zz");
    }

    #[test]
    fn forwarding_commands_map_one_to_one() {
        let mut widget = ready_widget();
        let cases = [
            (
                KeyToken::Named(NamedKey::Enter),
                EngineCommand::AcceptSelected,
            ),
            (KeyToken::Named(NamedKey::Esc), EngineCommand::Dismiss),
            (KeyToken::ctrl(KeyToken::Char('j')), EngineCommand::SelectNext),
            (KeyToken::ctrl(KeyToken::Char('k')), EngineCommand::SelectPrev),
        ];
        for (token, command) in cases {
            assert_eq!(
                widget.handle(Event::Key(token)),
                vec![Effect::Engine(command)]
            );
        }
        type_str(&mut widget, "q");
        let effects = widget.handle(Event::Key(KeyToken::ctrl(KeyToken::Named(NamedKey::Enter))));
        assert_eq!(
            effects,
            vec![Effect::Engine(EngineCommand::AcceptInput { text: "q".into() })]
        );
    }

    #[test]
    fn selected_push_moves_list_marker() {
        let mut widget = ready_widget();
        let items = vec![core_events::Item::default(); 5];
        // ready_widget drained the setup pass as seq 0; that is current.
        widget.handle(Event::Engine(EnginePush::Filtered {
            seq: 0,
            filtered: 5,
            total: 5,
            items,
        }));
        widget.handle(Event::Engine(EnginePush::Selected {
            index: 3,
            value: "x".into(),
        }));
        assert_eq!(widget.list().selected(), Some(3));
    }

    #[test]
    fn themed_push_lands_in_theme_store() {
        let mut widget = MenuWidget::default();
        widget.handle(Event::Engine(EnginePush::Themed {
            vars: vec![("--color".into(), "1,2,3".into())],
        }));
        assert_eq!(widget.theme().get("--color"), Some("1,2,3"));
    }

    #[test]
    fn shifted_chars_insert_like_plain_ones() {
        let mut widget = ready_widget();
        widget.handle(Event::Key(KeyToken::Chord {
            base: Box::new(KeyToken::Char('A')),
            mods: ModMask::SHIFT,
        }));
        assert_eq!(widget.input().text(), "A");
    }
}

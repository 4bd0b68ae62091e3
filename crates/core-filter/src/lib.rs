//! Filter coordination: debounce, sequencing, backpressure, staleness.
//!
//! The coordinator is the only part of the widget that decides *when* to talk
//! to the matching engine. It is a pure state machine: instead of owning
//! timers it returns [`Directive`]s (send this command now / schedule a timer
//! for this generation), and consumes timer expirations as plain events. That
//! keeps every policy decision testable without a clock; the tokio glue lives
//! in the `timer` module.
//!
//! Semantics:
//! - Keystroke bursts merge: at most one debounce timer is outstanding, and
//!   later edits within the window only overwrite the pending text.
//! - The delay grows linearly with the number of outstanding requests
//!   (`pending * base`), capped at the configured ceiling, so a slow engine
//!   is never flooded.
//! - Requests carry a pre-incremented sequence number; a response is applied
//!   only if its number matches the latest issued one. Stale responses are
//!   dropped silently — that drop is the system's only cancellation
//!   mechanism, and it is what keeps the view from regressing to results for
//!   older input when responses complete out of order.
//! - `complete`/`refresh` are terminal one-shots: they cancel any pending
//!   debounce outright and bypass sequencing.

use std::sync::atomic::Ordering::Relaxed;
use std::time::Duration;

use core_config::DebounceConfig;
use core_events::{
    DEBOUNCE_MERGES, EngineCommand, FILTER_REQUESTS_SENT, Item, STALE_RESULTS_DROPPED,
};
use tracing::{debug, trace};

pub mod timer;

pub use timer::DebounceTimer;

/// Backpressure delay policy: `delay = min(pending * base, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    pub base: Duration,
    pub max: Duration,
}

impl From<DebounceConfig> for DelayPolicy {
    fn from(config: DebounceConfig) -> Self {
        Self {
            base: Duration::from_millis(config.base_ms),
            max: Duration::from_millis(config.max_ms),
        }
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        DebounceConfig::default().into()
    }
}

/// What kind of engine traffic an edit notification asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    /// Ordinary debounced filter request.
    Filter,
    /// Immediate completion request; bypasses sequencing.
    Complete,
    /// Immediate recomputation request; bypasses sequencing.
    Refresh,
}

/// Instruction for the runtime hosting the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Forward this command to the engine now.
    Send(EngineCommand),
    /// Arrange for `Event::DebounceElapsed(generation)` after `delay`.
    Schedule { generation: u64, delay: Duration },
}

/// A current (non-stale) filter result, ready for the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUpdate {
    pub filtered: u64,
    pub total: u64,
    pub items: Vec<Item>,
}

#[derive(Debug)]
pub struct FilterCoordinator {
    /// Last assigned sequence number; pre-incremented, so the first request
    /// goes out as 0.
    seq: i64,
    /// In-flight or scheduled-but-unsent requests.
    pending: u32,
    latest_text: String,
    /// Bumped on every schedule and cancellation; an elapsed timer whose
    /// generation no longer matches is ignored.
    timer_generation: u64,
    timer_scheduled: bool,
    ready: bool,
    policy: DelayPolicy,
}

impl Default for FilterCoordinator {
    fn default() -> Self {
        Self::new(DelayPolicy::default())
    }
}

impl FilterCoordinator {
    pub fn new(policy: DelayPolicy) -> Self {
        Self {
            seq: -1,
            pending: 0,
            latest_text: String::new(),
            timer_generation: 0,
            timer_scheduled: false,
            ready: false,
            policy,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn current_seq(&self) -> i64 {
        self.seq
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Setup payload applied: filter traffic may flow.
    pub fn set_ready(&mut self) {
        self.ready = true;
    }

    /// A pick ended the session. The widget goes quiet until the next setup;
    /// a pending debounce would fire into a dead session, so it is cancelled.
    pub fn picked(&mut self) {
        self.ready = false;
        self.cancel_timer();
    }

    /// React to an edit. Returns at most one directive; `None` either means
    /// not ready, or that the edit merged into an already-scheduled window.
    pub fn notify_edit(&mut self, text: &str, kind: NotifyKind) -> Option<Directive> {
        if !self.ready {
            trace!(target: "filter.coordinator", ?kind, "notify_ignored_not_ready");
            return None;
        }
        match kind {
            NotifyKind::Complete => {
                self.cancel_timer();
                Some(Directive::Send(EngineCommand::Complete {
                    text: text.to_string(),
                }))
            }
            NotifyKind::Refresh => {
                self.cancel_timer();
                Some(Directive::Send(EngineCommand::Refresh {
                    text: text.to_string(),
                }))
            }
            NotifyKind::Filter => {
                self.latest_text = text.to_string();
                if self.timer_scheduled {
                    // Merge: the newest text wins when the timer fires.
                    DEBOUNCE_MERGES.fetch_add(1, Relaxed);
                    trace!(
                        target: "filter.coordinator",
                        generation = self.timer_generation,
                        "debounce_merge"
                    );
                    return None;
                }
                self.timer_generation += 1;
                self.timer_scheduled = true;
                let delay = self.delay();
                debug!(
                    target: "filter.coordinator",
                    generation = self.timer_generation,
                    pending = self.pending,
                    delay_ms = delay.as_millis() as u64,
                    "debounce_scheduled"
                );
                Some(Directive::Schedule {
                    generation: self.timer_generation,
                    delay,
                })
            }
        }
    }

    /// A debounce timer elapsed. Emits the filter request when the timer is
    /// still current; cancelled or superseded generations produce nothing.
    pub fn on_timer(&mut self, generation: u64) -> Option<EngineCommand> {
        if !self.timer_scheduled || generation != self.timer_generation {
            trace!(
                target: "filter.coordinator",
                generation,
                current = self.timer_generation,
                "timer_ignored"
            );
            return None;
        }
        self.timer_scheduled = false;
        self.pending += 1;
        self.seq += 1;
        FILTER_REQUESTS_SENT.fetch_add(1, Relaxed);
        debug!(
            target: "filter.coordinator",
            seq = self.seq,
            pending = self.pending,
            text_len = self.latest_text.len(),
            "filter_sent"
        );
        Some(EngineCommand::Filter {
            seq: self.seq,
            text: self.latest_text.clone(),
        })
    }

    /// Fold in an engine response. Every dispatched request frees one pending
    /// slot, answered or not; only the response matching the latest issued
    /// sequence number yields an update.
    pub fn on_result(
        &mut self,
        seq: i64,
        filtered: u64,
        total: u64,
        items: Vec<Item>,
    ) -> Option<ListUpdate> {
        self.pending = self.pending.saturating_sub(1);
        if seq != self.seq {
            STALE_RESULTS_DROPPED.fetch_add(1, Relaxed);
            debug!(
                target: "filter.coordinator",
                received = seq,
                current = self.seq,
                "stale_result_dropped"
            );
            return None;
        }
        Some(ListUpdate {
            filtered,
            total,
            items,
        })
    }

    fn delay(&self) -> Duration {
        self.policy.base.saturating_mul(self.pending).min(self.policy.max)
    }

    fn cancel_timer(&mut self) {
        if self.timer_scheduled {
            self.timer_generation += 1;
            self.timer_scheduled = false;
            trace!(
                target: "filter.coordinator",
                generation = self.timer_generation,
                "debounce_cancelled"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_coordinator() -> FilterCoordinator {
        let mut coordinator = FilterCoordinator::default();
        coordinator.set_ready();
        coordinator
    }

    fn policy(base_ms: u64, max_ms: u64) -> DelayPolicy {
        DelayPolicy {
            base: Duration::from_millis(base_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    #[test]
    fn not_ready_swallows_notifications() {
        let mut coordinator = FilterCoordinator::default();
        assert_eq!(coordinator.notify_edit("abc", NotifyKind::Filter), None);
        assert_eq!(coordinator.notify_edit("abc", NotifyKind::Complete), None);
    }

    #[test]
    fn burst_within_window_sends_one_request_with_last_text() {
        let mut coordinator = ready_coordinator();
        let Some(Directive::Schedule { generation, .. }) =
            coordinator.notify_edit("a", NotifyKind::Filter)
        else {
            panic!("first edit should schedule");
        };
        assert_eq!(coordinator.notify_edit("ab", NotifyKind::Filter), None);
        assert_eq!(coordinator.notify_edit("abc", NotifyKind::Filter), None);

        let sent = coordinator.on_timer(generation).unwrap();
        assert_eq!(
            sent,
            EngineCommand::Filter {
                seq: 0,
                text: "abc".into()
            }
        );
        // The window is spent: a later firing of the same generation is dead.
        assert_eq!(coordinator.on_timer(generation), None);
    }

    #[test]
    fn sequence_numbers_pre_increment_from_zero() {
        let mut coordinator = ready_coordinator();
        for expected in 0..3 {
            let Some(Directive::Schedule { generation, .. }) =
                coordinator.notify_edit("x", NotifyKind::Filter)
            else {
                panic!("edit should schedule");
            };
            let Some(EngineCommand::Filter { seq, .. }) = coordinator.on_timer(generation) else {
                panic!("timer should send");
            };
            assert_eq!(seq, expected);
        }
    }

    #[test]
    fn stale_result_never_mutates_the_view() {
        let mut coordinator = ready_coordinator();
        for _ in 0..2 {
            let Some(Directive::Schedule { generation, .. }) =
                coordinator.notify_edit("x", NotifyKind::Filter)
            else {
                panic!("edit should schedule");
            };
            coordinator.on_timer(generation);
        }
        assert_eq!(coordinator.current_seq(), 1);
        assert_eq!(coordinator.pending(), 2);

        // Response for the superseded request: dropped, slot freed.
        assert_eq!(coordinator.on_result(0, 10, 100, Vec::new()), None);
        assert_eq!(coordinator.pending(), 1);

        // Response for the current request applies.
        let update = coordinator.on_result(1, 3, 100, Vec::new()).unwrap();
        assert_eq!((update.filtered, update.total), (3, 100));
        assert_eq!(coordinator.pending(), 0);
    }

    #[test]
    fn result_seq_from_the_future_is_also_dropped() {
        let mut coordinator = ready_coordinator();
        assert_eq!(coordinator.on_result(5, 1, 1, Vec::new()), None);
    }

    #[test]
    fn backpressure_delay_is_linear_and_capped() {
        let mut coordinator = FilterCoordinator::new(policy(50, 120));
        coordinator.set_ready();

        // No outstanding requests: immediate window.
        let Some(Directive::Schedule { generation, delay }) =
            coordinator.notify_edit("a", NotifyKind::Filter)
        else {
            panic!("should schedule");
        };
        assert_eq!(delay, Duration::from_millis(0));
        coordinator.on_timer(generation);

        // One outstanding: one base step.
        let Some(Directive::Schedule { generation, delay }) =
            coordinator.notify_edit("b", NotifyKind::Filter)
        else {
            panic!("should schedule");
        };
        assert_eq!(delay, Duration::from_millis(50));
        coordinator.on_timer(generation);

        // Two outstanding: linear would be 100, still under the ceiling.
        let Some(Directive::Schedule { generation, delay }) =
            coordinator.notify_edit("c", NotifyKind::Filter)
        else {
            panic!("should schedule");
        };
        assert_eq!(delay, Duration::from_millis(100));
        coordinator.on_timer(generation);

        // Three outstanding: linear 150 clamps to the 120 ms ceiling.
        let Some(Directive::Schedule { delay, .. }) =
            coordinator.notify_edit("d", NotifyKind::Filter)
        else {
            panic!("should schedule");
        };
        assert_eq!(delay, Duration::from_millis(120));
    }

    #[test]
    fn complete_cancels_pending_debounce() {
        let mut coordinator = ready_coordinator();
        let Some(Directive::Schedule { generation, .. }) =
            coordinator.notify_edit("ab", NotifyKind::Filter)
        else {
            panic!("should schedule");
        };
        let sent = coordinator.notify_edit("ab", NotifyKind::Complete).unwrap();
        assert_eq!(
            sent,
            Directive::Send(EngineCommand::Complete { text: "ab".into() })
        );
        // The cancelled window never fires.
        assert_eq!(coordinator.on_timer(generation), None);
        // Completion bypassed sequencing entirely.
        assert_eq!(coordinator.current_seq(), -1);
    }

    #[test]
    fn refresh_is_sent_immediately() {
        let mut coordinator = ready_coordinator();
        let sent = coordinator.notify_edit("xyz", NotifyKind::Refresh).unwrap();
        assert_eq!(
            sent,
            Directive::Send(EngineCommand::Refresh { text: "xyz".into() })
        );
    }

    #[test]
    fn picked_goes_quiet_and_cancels_timers() {
        let mut coordinator = ready_coordinator();
        let Some(Directive::Schedule { generation, .. }) =
            coordinator.notify_edit("a", NotifyKind::Filter)
        else {
            panic!("should schedule");
        };
        coordinator.picked();
        assert_eq!(coordinator.on_timer(generation), None);
        assert_eq!(coordinator.notify_edit("b", NotifyKind::Filter), None);
        // Next session resumes after setup, sequence numbers still monotonic.
        coordinator.set_ready();
        let Some(Directive::Schedule { generation, .. }) =
            coordinator.notify_edit("c", NotifyKind::Filter)
        else {
            panic!("should schedule");
        };
        assert!(coordinator.on_timer(generation).is_some());
    }

    #[test]
    fn pending_decrement_saturates_at_zero() {
        let mut coordinator = ready_coordinator();
        assert_eq!(coordinator.pending(), 0);
        coordinator.on_result(0, 0, 0, Vec::new());
        assert_eq!(coordinator.pending(), 0);
    }
}

//! One-shot debounce timers.
//!
//! The coordinator never owns a clock: when it returns
//! `Directive::Schedule { generation, delay }` the runtime spawns one of
//! these, and the expiration comes back through the event channel as
//! `Event::DebounceElapsed(generation)`. Cancellation is generation
//! invalidation inside the coordinator — an obsolete timer still fires, and
//! its event is ignored — so tasks are never aborted mid-sleep.

use std::sync::atomic::Ordering::Relaxed;
use std::time::Duration;

use core_events::{AsyncEventSource, CHANNEL_SEND_FAILURES, Event};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tracing::trace;

/// A single debounce window.
#[derive(Debug, Clone, Copy)]
pub struct DebounceTimer {
    pub generation: u64,
    pub delay: Duration,
}

impl DebounceTimer {
    pub fn new(generation: u64, delay: Duration) -> Self {
        Self { generation, delay }
    }
}

impl AsyncEventSource for DebounceTimer {
    fn name(&self) -> &'static str {
        "debounce"
    }

    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        spawn_debounce(&tx, self.generation, self.delay)
    }
}

/// Spawn the sleep task directly; the registry indirection is unnecessary for
/// per-keystroke timers.
pub fn spawn_debounce(tx: &Sender<Event>, generation: u64, delay: Duration) -> JoinHandle<()> {
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        trace!(target: "filter.timer", generation, "debounce_elapsed");
        if tx.send(Event::DebounceElapsed(generation)).await.is_err() {
            CHANNEL_SEND_FAILURES.fetch_add(1, Relaxed);
        }
    })
}

//! Event and message vocabulary for the filter widget.
//!
//! Everything the widget consumes arrives as an [`Event`] on one bounded mpsc
//! channel: logical key tokens, pushes from the matching engine, and debounce
//! timer expirations. Everything the widget emits toward the engine is an
//! [`EngineCommand`]. Both enums are wire-shaped (serde) so a transport can
//! serialize them directly; the widget itself never touches the transport.
//!
//! Channel policy: a single consumer (the widget runtime) drains the channel
//! on one logical thread; producers are background tokio tasks registered as
//! [`AsyncEventSource`]s. Producers must exit promptly when the channel
//! closes. The channel is bounded by [`EVENT_CHANNEL_CAP`] so a stalled
//! consumer applies natural backpressure instead of growing without bound.

use std::fmt;
use std::sync::atomic::AtomicU64;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

pub const EVENT_CHANNEL_CAP: usize = 1024;

// -------------------------------------------------------------------------------------------------
// Telemetry
// -------------------------------------------------------------------------------------------------
// Relaxed atomic counters, inspected by tests and periodic logging. These are
// intentionally minimal; they exist so the debounce/stale-drop behavior can be
// observed without parsing logs.
// -------------------------------------------------------------------------------------------------
pub static FILTER_REQUESTS_SENT: AtomicU64 = AtomicU64::new(0);
pub static STALE_RESULTS_DROPPED: AtomicU64 = AtomicU64::new(0);
pub static DEBOUNCE_MERGES: AtomicU64 = AtomicU64::new(0);
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);

/// Top-level event enum consumed by the widget runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Logical keystroke, already decoded from whatever input layer hosts
    /// the widget.
    Key(KeyToken),
    /// Asynchronous push from the matching engine.
    Engine(EnginePush),
    /// A debounce timer fired. The generation identifies which schedule it
    /// belongs to; stale generations are ignored by the coordinator.
    DebounceElapsed(u64),
    Shutdown,
}

// -------------------------------------------------------------------------------------------------
// Logical keys
// -------------------------------------------------------------------------------------------------

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 { const CTRL=1; const ALT=2; const SHIFT=4; const META=8; }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Esc,
    Backspace,
    Tab,
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
}

/// Canonical logical key tokens. `Chord` wraps a base token plus a modifier
/// mask so combinations like `<C-w>` survive without lossy shortcuts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Char(char),
    Named(NamedKey),
    Chord { base: Box<KeyToken>, mods: ModMask },
}

impl KeyToken {
    pub fn ctrl(base: KeyToken) -> Self {
        KeyToken::Chord {
            base: Box::new(base),
            mods: ModMask::CTRL,
        }
    }

    pub fn alt(base: KeyToken) -> Self {
        KeyToken::Chord {
            base: Box::new(base),
            mods: ModMask::ALT,
        }
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(c) => write!(f, "{c:?}"),
            KeyToken::Named(k) => write!(f, "{k:?}"),
            KeyToken::Chord { base, mods } => write!(f, "{mods:?}+{base}"),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Engine-facing commands (widget -> engine)
// -------------------------------------------------------------------------------------------------

/// Requests issued to the matching engine. All are fire-and-forget from the
/// widget's perspective; answers (if any) come back as [`EnginePush`]es.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EngineCommand {
    /// Sequence-numbered filter request. Only the response matching the
    /// latest issued `seq` will ever be applied.
    Filter { seq: i64, text: String },
    /// Terminal one-shot completion request; bypasses sequencing.
    Complete { text: String },
    /// Force recomputation without changing sequencing semantics.
    Refresh { text: String },
    AcceptInput { text: String },
    AcceptSelected,
    Dismiss,
    SelectNext,
    SelectPrev,
    RequestNextFromHistory { index: i64, value: String },
    RequestPrevFromHistory { index: i64, value: String },
}

// -------------------------------------------------------------------------------------------------
// Engine pushes (engine -> widget)
// -------------------------------------------------------------------------------------------------

/// One contiguous slice of an item's display text. Concatenating
/// `unmatched + matched` over all partitions reconstructs the text; `matched`
/// marks the substrings that satisfied the filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Partition {
    #[serde(default)]
    pub unmatched: String,
    #[serde(default)]
    pub matched: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
}

/// One entry of a filtered view. The engine windows the full match set; the
/// widget renders exactly what it is given.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub partitions: Vec<Partition>,
    #[serde(default)]
    pub data: ItemData,
    #[serde(default)]
    pub selected: bool,
}

impl Item {
    /// Reassemble the display text from the partition list.
    pub fn display_text(&self) -> String {
        let mut text = String::new();
        for partition in &self.partitions {
            text.push_str(&partition.unmatched);
            text.push_str(&partition.matched);
        }
        text
    }
}

/// Asynchronous pushes from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "push", rename_all = "snake_case")]
pub enum EnginePush {
    /// Initial session payload; the body is the raw JSON setup document
    /// (parsed by `core-config`, which degrades malformed payloads to
    /// defaults instead of failing).
    Setup { payload: String },
    Selected {
        index: usize,
        value: String,
    },
    Filtered {
        seq: i64,
        filtered: u64,
        total: u64,
        items: Vec<Item>,
    },
    History {
        index: i64,
        value: String,
    },
    Completed { text: String },
    Picked,
    Themed { vars: Vec<(String, String)> },
}

/// Helper result type for channel utilities.
pub type EventResult<T> = anyhow::Result<T>;

// -------------------------------------------------------------------------------------------------
// Async event sources
// -------------------------------------------------------------------------------------------------
// Background producers (debounce timers, engine transports, test drivers)
// register uniformly. Each source owns one spawned task; on channel send
// failure (consumer dropped) it must terminate promptly. Bounded channel
// capacity provides the only flow control.

pub trait AsyncEventSource: Send + 'static {
    /// Stable identifier used for logging and diagnostics.
    fn name(&self) -> &'static str;
    /// Consume self and spawn the producing task. Implementors stop when
    /// `tx.send(..).await` errors (channel closed) or when their own work is
    /// done; they must not busy-loop.
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Registry of event sources, spawned together at runtime startup.
#[derive(Default)]
pub struct EventSourceRegistry {
    sources: Vec<Box<dyn AsyncEventSource>>,
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: AsyncEventSource>(&mut self, src: S) {
        self.sources.push(Box::new(src));
    }

    /// Spawn all registered sources, returning their JoinHandles. Ownership
    /// of the sources is taken so a second call cannot double-spawn. During
    /// shutdown the caller drops its final `Sender` clone before awaiting the
    /// handles so sources observe the closed channel and exit cooperatively.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::with_capacity(self.sources.len());
        for src in self.sources.drain(..) {
            tracing::info!(target: "runtime.events", source = src.name(), "spawning event source");
            handles.push(src.spawn(tx.clone()));
        }
        handles
    }
}

//! Event-loop glue between the widget, the event channel, and the engine.
//!
//! The runtime is the single consumer of the bounded event channel: it feeds
//! each event through [`MenuWidget::handle`], forwards engine effects over an
//! injected [`EngineBridge`], and spawns one-shot debounce timers for
//! schedule effects. Transport and window management stay outside; hosts
//! implement `EngineBridge` however their bridge works and push engine
//! responses back into the channel as [`Event::Engine`].

use core_events::{Event, EventResult, EngineCommand, EVENT_CHANNEL_CAP};
use core_filter::timer::spawn_debounce;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info};

use crate::{Effect, MenuWidget};

/// Outbound half of the engine transport. Implementations must not block;
/// commands are fire-and-forget.
pub trait EngineBridge: Send {
    fn send(&mut self, command: EngineCommand);
}

pub struct MenuRuntime<B: EngineBridge> {
    widget: MenuWidget,
    bridge: B,
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl<B: EngineBridge> MenuRuntime<B> {
    pub fn new(widget: MenuWidget, bridge: B) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAP);
        Self {
            widget,
            bridge,
            tx,
            rx,
        }
    }

    /// Producer handle for key sources, engine transports, and tests.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn widget(&self) -> &MenuWidget {
        &self.widget
    }

    /// Drain the channel until `Shutdown` or until every producer hangs up.
    pub async fn run(&mut self) -> EventResult<()> {
        info!(target: "runtime.events", "menu runtime started");
        while let Some(event) = self.rx.recv().await {
            if event == Event::Shutdown {
                debug!(target: "runtime.events", "shutdown event");
                break;
            }
            for effect in self.widget.handle(event) {
                match effect {
                    Effect::Engine(command) => self.bridge.send(command),
                    Effect::Schedule { generation, delay } => {
                        spawn_debounce(&self.tx, generation, delay);
                    }
                }
            }
        }
        info!(target: "runtime.events", "menu runtime stopped");
        Ok(())
    }
}

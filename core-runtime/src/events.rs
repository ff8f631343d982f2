//! # Event Bus
//!
//! Decoupled communication between the core and host UIs over a
//! `tokio::sync::broadcast` channel. The sync task publishes typed
//! [`CoreEvent`]s; any number of subscribers consume them independently.
//!
//! Slow subscribers receive `RecvError::Lagged(n)` and can keep reading;
//! `RecvError::Closed` signals shutdown. Emission never blocks: when no
//! subscriber is attached, [`EventBus::emit`] returns an error which call
//! sites are expected to discard (`.ok()`).
//!
//! ## Usage
//!
//! ```
//! use core_runtime::events::{CoreEvent, EventBus, SyncEvent};
//!
//! let bus = EventBus::new(100);
//! let mut rx = bus.subscribe();
//!
//! bus.emit(CoreEvent::Sync(SyncEvent::Started)).ok();
//! assert_eq!(rx.try_recv().unwrap(), CoreEvent::Sync(SyncEvent::Started));
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Form synchronization events
    Sync(SyncEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &'static str {
        match self {
            CoreEvent::Sync(e) => e.description(),
        }
    }
}

/// Events emitted around a form synchronization pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncEvent {
    /// A sync pass acquired the change lock and started.
    Started,
    /// A sync pass finished successfully.
    Completed {
        forms_deleted: u64,
        forms_downloaded: u64,
    },
    /// A sync pass failed; `message` is the rendered error.
    Failed { message: String },
}

impl SyncEvent {
    pub fn description(&self) -> &'static str {
        match self {
            SyncEvent::Started => "Sync started",
            SyncEvent::Completed { .. } => "Sync completed",
            SyncEvent::Failed { .. } => "Sync failed",
        }
    }
}

/// Central broadcast channel for core events.
///
/// Cheap to clone; all clones publish into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Create an event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error when there are none. Emission is fire-and-forget at call
    /// sites: `bus.emit(event).ok()`.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

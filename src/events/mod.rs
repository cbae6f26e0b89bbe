//! Events emitted by the kernel and the sink trait that receives them
//!
//! Events are the kernel's sole output channel besides return values. They
//! are emitted synchronously, in the exact order their triggering
//! operations ran; the kernel never batches, deduplicates, or reorders.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::types::{AllianceRequestId, Cell, PlayerId};

/// State-change notifications emitted by the kernel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player was registered
    PlayerAdded { player: PlayerId },
    /// A tile changed owner (conquer or relinquish)
    TileChanged { cell: Cell },
    /// A boat execution moved; carries the prior position for observers
    BoatMoved { owner: PlayerId, from: Cell, to: Cell },
    /// An alliance request was created
    AllianceRequested {
        request: AllianceRequestId,
        requestor: PlayerId,
        recipient: PlayerId,
    },
    /// An alliance request was accepted or rejected
    AllianceReply {
        request: AllianceRequestId,
        requestor: PlayerId,
        recipient: PlayerId,
        accepted: bool,
    },
    /// An existing alliance was broken by one of its members
    AllianceBroken { breaker: PlayerId, other: PlayerId },
}

/// Synchronous event sink fed by the kernel
pub trait EventBus {
    fn emit(&mut self, event: GameEvent);
}

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBus;

impl EventBus for NullBus {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Capture sink backed by a shared buffer.
///
/// Clone the handle before boxing it into the kernel; the clone observes
/// everything emitted afterwards. Used by tests and the demo driver.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events emitted so far
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Drain and return all captured events
    pub fn take(&self) -> Vec<GameEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventBus for EventLog {
    fn emit(&mut self, event: GameEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_preserves_order() {
        let log = EventLog::new();
        let mut sink = log.clone();
        sink.emit(GameEvent::PlayerAdded {
            player: PlayerId(1),
        });
        sink.emit(GameEvent::TileChanged {
            cell: Cell::new(0, 0),
        });
        assert_eq!(
            log.events(),
            vec![
                GameEvent::PlayerAdded {
                    player: PlayerId(1)
                },
                GameEvent::TileChanged {
                    cell: Cell::new(0, 0)
                },
            ]
        );
    }

    #[test]
    fn test_take_drains_the_log() {
        let log = EventLog::new();
        let mut sink = log.clone();
        sink.emit(GameEvent::PlayerAdded {
            player: PlayerId(1),
        });
        assert_eq!(log.take().len(), 1);
        assert!(log.is_empty());
    }
}

//! Lifecycle notifications.
//!
//! The state machine and the ability manager each own a synchronous
//! [`EventQueue`]; the owning actor drains them once per tick and forwards
//! the records to whatever sink it uses. Delivery is fire-and-forget and
//! order-preserving. Records are stamped with the component's own logic
//! clock, not wall time.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Logic-clock timestamp, advanced once per logic pass.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Tick(pub u64);

/// Why an ability reported a failure.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FailureReason {
    /// Activation or effect refused because a cooldown is still running.
    Cooldown,
    /// The actor is in a state the ability cannot act from.
    InvalidState,
    /// A required resource (stamina, charge, item) was missing.
    MissingResource,
    /// Anything the other variants do not cover; `detail` carries the text.
    Internal,
}

/// Structured notification emitted by the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActorEvent {
    /// Exactly one per successful transition.
    StateChanged {
        previous: Option<String>,
        current: String,
    },
    AbilityStarted {
        id: String,
    },
    AbilityEnded {
        id: String,
    },
    AbilityFailed {
        id: String,
        reason: FailureReason,
        detail: String,
    },
}

/// A timestamped, sequenced notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotone sequence number within the owning queue.
    pub seq: u64,
    /// Logic clock of the emitting component at publish time.
    pub at: Tick,
    pub event: ActorEvent,
}

/// Bounded, ordered notification queue drained once per tick.
#[derive(Debug)]
pub struct EventQueue {
    records: VecDeque<EventRecord>,
    capacity: usize,
    next_seq: u64,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
            next_seq: 0,
        }
    }

    /// Appends a record. When the queue is full the oldest undrained record
    /// is dropped; the sink missed a tick, not the publisher.
    pub fn publish(&mut self, at: Tick, event: ActorEvent) {
        if self.records.len() >= self.capacity {
            if let Some(dropped) = self.records.pop_front() {
                warn!(
                    target: "actor_core::events",
                    seq = dropped.seq,
                    "event queue full, dropping oldest record"
                );
            }
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records.push_back(EventRecord { seq, at, event });
    }

    /// Removes and returns every pending record in publish order.
    pub fn drain(&mut self) -> Vec<EventRecord> {
        self.records.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//! # Progression Events
//!
//! Notifications posted by the trackers after a successful write.
//!
//! There is no process-wide bus. Callers inject an `EventSink`:
//! - `EventBus`: an in-process observer list, created at startup
//! - `mpsc::Sender<LevelUpEvent>`: forwards events over a channel
//! - `()`: discards events
//!
//! Delivery is fire-and-forget; posting never fails the calling operation.

use crate::{MissionId, WorldId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::mpsc;

// =============================================================================
// EVENTS
// =============================================================================

/// A progression state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LevelUpEvent {
    /// A mission's completion counter was incremented.
    MissionCompleted { mission_id: MissionId },
    /// A mission's completion counter was decremented (or clamped at zero).
    MissionCompletionRevoked { mission_id: MissionId },
    /// A world changed from not completed to completed.
    WorldCompleted { world_id: WorldId },
    /// A world's reward was assigned or cleared.
    WorldAssignedReward { world_id: WorldId },
}

impl LevelUpEvent {
    /// Stable dotted name of the event kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissionCompleted { .. } => "mission.completed",
            Self::MissionCompletionRevoked { .. } => "mission.completion_revoked",
            Self::WorldCompleted { .. } => "world.completed",
            Self::WorldAssignedReward { .. } => "world.assigned_reward",
        }
    }

    /// Id of the mission or world the event refers to.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::MissionCompleted { mission_id }
            | Self::MissionCompletionRevoked { mission_id } => mission_id.as_str(),
            Self::WorldCompleted { world_id } | Self::WorldAssignedReward { world_id } => {
                world_id.as_str()
            }
        }
    }
}

impl fmt::Display for LevelUpEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.as_str(), self.subject())
    }
}

// =============================================================================
// EVENTSINK TRAIT
// =============================================================================

/// Receiver of progression events.
pub trait EventSink {
    /// Deliver an event. Must not fail the caller.
    fn post(&self, event: LevelUpEvent);
}

impl<E: EventSink + ?Sized> EventSink for &E {
    fn post(&self, event: LevelUpEvent) {
        (**self).post(event);
    }
}

/// Discards every event.
impl EventSink for () {
    fn post(&self, _event: LevelUpEvent) {}
}

impl EventSink for mpsc::Sender<LevelUpEvent> {
    fn post(&self, event: LevelUpEvent) {
        if let Err(mpsc::SendError(event)) = self.send(event) {
            tracing::debug!(%event, "event receiver dropped, event discarded");
        }
    }
}

// =============================================================================
// EVENT BUS
// =============================================================================

type Subscriber = Box<dyn Fn(&LevelUpEvent) + Send + Sync>;

/// An in-process observer list.
///
/// Subscribers run synchronously on the posting thread, in subscription
/// order.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for every subsequent event.
    pub fn subscribe(&mut self, subscriber: impl Fn(&LevelUpEvent) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl EventSink for EventBus {
    fn post(&self, event: LevelUpEvent) {
        tracing::debug!(%event, subscribers = self.subscribers.len(), "posting event");
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

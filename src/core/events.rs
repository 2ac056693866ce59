//! Record change notifications
//!
//! Stores publish a [`RecordEvent`] for every successful mutation on an
//! [`EventBus`]. List views that share a store subscribe to it to know when
//! their current page may be stale.
//!
//! ```rust,ignore
//! let bus = EventBus::new(64);
//! let mut rx = bus.subscribe();
//! let store = InMemoryRecordStore::<Document>::new().with_event_bus(bus);
//!
//! store.delete(3).await?;
//! let envelope = rx.recv().await?;
//! assert_eq!(envelope.event.action(), "deleted");
//! ```

use crate::core::record::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events related to record mutations (create, update, delete)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RecordEvent {
    /// A record was created
    Created {
        collection: String,
        record_id: RecordId,
        data: serde_json::Value,
    },
    /// A record was updated
    Updated {
        collection: String,
        record_id: RecordId,
        data: serde_json::Value,
    },
    /// A record was deleted
    Deleted {
        collection: String,
        record_id: RecordId,
    },
}

impl RecordEvent {
    /// Collection the event relates to
    pub fn collection(&self) -> &str {
        match self {
            RecordEvent::Created { collection, .. }
            | RecordEvent::Updated { collection, .. }
            | RecordEvent::Deleted { collection, .. } => collection,
        }
    }

    pub fn record_id(&self) -> RecordId {
        match self {
            RecordEvent::Created { record_id, .. }
            | RecordEvent::Updated { record_id, .. }
            | RecordEvent::Deleted { record_id, .. } => *record_id,
        }
    }

    /// Get the action name (created, updated, deleted)
    pub fn action(&self) -> &str {
        match self {
            RecordEvent::Created { .. } => "created",
            RecordEvent::Updated { .. } => "updated",
            RecordEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Envelope wrapping a record event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: RecordEvent,
}

impl EventEnvelope {
    pub fn new(event: RecordEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; every clone publishes to the same subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Receivers that fall more than `capacity` events behind get a
    /// `Lagged` error on their next `recv()`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of receivers that will see the event; zero when
    /// nobody is subscribed.
    pub fn publish(&self, event: RecordEvent) -> usize {
        self.sender.send(EventEnvelope::new(event)).unwrap_or(0)
    }

    /// Subscribe to future events
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

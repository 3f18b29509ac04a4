//! Realtime event record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Channel;

/// A single server-pushed event as delivered to dashboard subscribers.
///
/// Events are kept in arrival order and are never persisted; the hub holds
/// a bounded in-memory window of the most recent ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Channel this event was published on
    pub channel: Channel,

    /// Application-level payload, opaque to the hub
    pub payload: serde_json::Value,

    /// When the hub accepted the event
    pub timestamp: DateTime<Utc>,
}

impl EventRecord {
    /// Create a record stamped with the current time.
    pub fn now(channel: Channel, payload: serde_json::Value) -> Self {
        Self {
            channel,
            payload,
            timestamp: Utc::now(),
        }
    }
}

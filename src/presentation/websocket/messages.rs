//! WebSocket Message Types
//!
//! JSON frame formats exchanged between the dashboard and the hub. Every
//! frame is tagged with an `op` field; channel names in client frames stay
//! strings so unknown channels can be rejected per-frame.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::EventRecord;
use crate::domain::value_objects::Channel;

/// Client-to-server control frames
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Start observing a channel (idempotent)
    Subscribe { channel: String },
    /// Stop observing a channel (idempotent)
    Unsubscribe { channel: String },
    /// Transmit an application-level event to a channel's subscribers
    Publish {
        channel: String,
        payload: serde_json::Value,
    },
    /// Reset the idle timer after a session refresh
    Extend,
    /// Liveness probe
    Ping,
}

/// Server-to-client frames
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Sent once on connect
    Hello {
        heartbeat_interval_ms: u64,
        subscriptions: Vec<Channel>,
    },
    /// A published event on a subscribed channel, in arrival order
    Event {
        channel: Channel,
        payload: serde_json::Value,
        timestamp: DateTime<Utc>,
    },
    /// Subscription acknowledgement
    Subscribed { channel: Channel },
    /// Unsubscription acknowledgement
    Unsubscribed { channel: Channel },
    /// Idle timeout warning; remaining session time in milliseconds
    Warning { remaining_ms: u64 },
    /// Idle timer reset acknowledgement
    Extended { expires_in: u64 },
    /// Liveness reply
    Pong,
    /// Malformed or unprocessable client frame
    Error { message: String },
}

impl From<EventRecord> for ServerFrame {
    fn from(record: EventRecord) -> Self {
        ServerFrame::Event {
            channel: record.channel,
            payload: record.payload,
            timestamp: record.timestamp,
        }
    }
}

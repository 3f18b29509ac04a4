//! WebSocket Hub
//!
//! Manages connected dashboard clients, their channel subscriptions, and
//! event fan-out. Events are delivered to each subscriber in arrival order
//! through the connection's outbound queue; a bounded window of recent
//! events is retained in memory for dashboard catch-up. Nothing persists.

use std::collections::{HashSet, VecDeque};

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::messages::ServerFrame;
use crate::domain::entities::EventRecord;
use crate::domain::value_objects::{Channel, DEFAULT_CHANNELS};
use crate::infrastructure::metrics;

/// Number of recent events retained for catch-up reads.
const RECENT_EVENTS_CAPACITY: usize = 256;

/// A connected dashboard client.
pub struct ConnectedClient {
    pub username: String,
    pub sender: mpsc::UnboundedSender<ServerFrame>,
}

/// Hub managing all dashboard connections.
pub struct Hub {
    /// Active connections by connection id
    connections: DashMap<String, ConnectedClient>,
    /// Connection id -> subscribed channels (reverse index)
    subscriptions: DashMap<String, HashSet<Channel>>,
    /// Bounded ordered window of recently published events
    recent: Mutex<VecDeque<EventRecord>>,
}

impl Hub {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            subscriptions: DashMap::new(),
            recent: Mutex::new(VecDeque::with_capacity(RECENT_EVENTS_CAPACITY)),
        }
    }

    /// Register a new connection and subscribe it to the default channels.
    pub fn register(
        &self,
        conn_id: String,
        username: String,
        sender: mpsc::UnboundedSender<ServerFrame>,
    ) -> Vec<Channel> {
        self.connections
            .insert(conn_id.clone(), ConnectedClient { username: username.clone(), sender });
        self.subscriptions
            .insert(conn_id.clone(), DEFAULT_CHANNELS.into_iter().collect());
        metrics::WEBSOCKET_CONNECTIONS_ACTIVE.set(self.connections.len() as i64);

        tracing::info!(
            username = %username,
            conn_id = %conn_id,
            "Dashboard connection registered"
        );
        DEFAULT_CHANNELS.to_vec()
    }

    /// Unregister a connection, clearing its subscription set.
    pub fn unregister(&self, conn_id: &str) {
        self.subscriptions.remove(conn_id);
        if let Some((_, client)) = self.connections.remove(conn_id) {
            metrics::WEBSOCKET_CONNECTIONS_ACTIVE.set(self.connections.len() as i64);
            tracing::info!(
                username = %client.username,
                conn_id = %conn_id,
                "Dashboard connection unregistered"
            );
        }
    }

    /// Add a channel subscription (idempotent).
    pub fn subscribe(&self, conn_id: &str, channel: Channel) {
        self.subscriptions
            .entry(conn_id.to_string())
            .or_default()
            .insert(channel);
    }

    /// Remove a channel subscription (idempotent).
    pub fn unsubscribe(&self, conn_id: &str, channel: Channel) {
        if let Some(mut channels) = self.subscriptions.get_mut(conn_id) {
            channels.remove(&channel);
        }
    }

    /// Whether a connection currently observes a channel.
    pub fn is_subscribed(&self, conn_id: &str, channel: Channel) -> bool {
        self.subscriptions
            .get(conn_id)
            .map(|channels| channels.contains(&channel))
            .unwrap_or(false)
    }

    /// Publish an event: append to the recent window and fan out to every
    /// connection subscribed to the channel.
    pub fn publish(&self, channel: Channel, payload: serde_json::Value) {
        let record = EventRecord::now(channel, payload);
        metrics::record_realtime_event(channel.as_str());

        {
            let mut recent = self.recent.lock();
            if recent.len() == RECENT_EVENTS_CAPACITY {
                recent.pop_front();
            }
            recent.push_back(record.clone());
        }

        for entry in self.subscriptions.iter() {
            if !entry.value().contains(&channel) {
                continue;
            }
            if let Some(client) = self.connections.get(entry.key()) {
                let _ = client.sender.send(record.clone().into());
            }
        }
    }

    /// Number of active connections.
    pub fn session_count(&self) -> usize {
        self.connections.len()
    }

    /// Snapshot of the recent event window, oldest first.
    pub fn recent_events(&self) -> Vec<EventRecord> {
        self.recent.lock().iter().cloned().collect()
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

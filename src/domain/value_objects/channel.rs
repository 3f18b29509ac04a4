//! Realtime channel definitions and parsing.

use serde::{Deserialize, Serialize};

/// Named channels the dashboard can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Periodic server/VPN fleet metrics for the dashboard tiles.
    SystemMetrics,
    /// Security-relevant events (failed admin logins, auth anomalies).
    SecurityAlerts,
    /// VPN client lifecycle updates (connect, disconnect, plan changes).
    ClientUpdates,
}

/// Channels every connection is subscribed to automatically on connect.
pub const DEFAULT_CHANNELS: [Channel; 3] = [
    Channel::SystemMetrics,
    Channel::SecurityAlerts,
    Channel::ClientUpdates,
];

impl Channel {
    /// Parses a channel name into a typed channel.
    pub fn parse(channel: &str) -> Option<Self> {
        match channel {
            "system_metrics" => Some(Channel::SystemMetrics),
            "security_alerts" => Some(Channel::SecurityAlerts),
            "client_updates" => Some(Channel::ClientUpdates),
            _ => None,
        }
    }

    /// Converts back to the channel name string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::SystemMetrics => "system_metrics",
            Channel::SecurityAlerts => "security_alerts",
            Channel::ClientUpdates => "client_updates",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

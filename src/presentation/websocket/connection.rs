//! WebSocket Connection State

use std::time::Instant;

use crate::domain::services::{IdlePhase, IdleTimer};

/// Per-connection state tracked by the connection task.
#[derive(Debug)]
pub struct ConnectionState {
    pub conn_id: String,
    pub username: String,
    /// Session deadline the idle indicator counts down to
    pub session_deadline: Instant,
    pub idle: IdleTimer,
    pub last_seen: Instant,
}

impl ConnectionState {
    pub fn new(
        conn_id: String,
        username: String,
        session_ttl_secs: u64,
        warning_threshold_ms: u64,
    ) -> Self {
        let now = Instant::now();
        Self {
            conn_id,
            username,
            session_deadline: now + std::time::Duration::from_secs(session_ttl_secs),
            idle: IdleTimer::new(warning_threshold_ms),
            last_seen: now,
        }
    }

    /// Record inbound activity.
    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    /// Whether the peer has been heard from within the timeout.
    pub fn is_alive(&self, timeout_ms: u64) -> bool {
        self.last_seen.elapsed().as_millis() < timeout_ms as u128
    }

    /// Remaining session time in milliseconds (zero once past the deadline).
    pub fn remaining_ms(&self) -> u64 {
        self.session_deadline
            .saturating_duration_since(Instant::now())
            .as_millis() as u64
    }

    /// Feed the idle machine the current remaining time.
    pub fn observe_idle(&mut self) -> IdlePhase {
        let remaining = self.remaining_ms();
        self.idle.observe(remaining)
    }

    /// Reset the session deadline after a successful refresh.
    pub fn extend_session(&mut self, ttl_secs: u64) {
        self.session_deadline = Instant::now() + std::time::Duration::from_secs(ttl_secs);
        self.idle.extend();
    }
}

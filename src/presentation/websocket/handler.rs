//! WebSocket Connection Handler
//!
//! Handles individual dashboard connections: session-gated upgrade, default
//! channel subscription, frame processing, and the idle timeout ticker.

use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::interval;
use uuid::Uuid;

use super::connection::ConnectionState;
use super::messages::{ClientFrame, ServerFrame};
use crate::application::services::SESSION_COOKIE;
use crate::domain::services::IdlePhase;
use crate::domain::value_objects::Channel;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Grace period beyond the heartbeat interval before a silent peer is dropped.
const HEARTBEAT_GRACE_MS: u64 = 10_000;

/// WebSocket upgrade handler.
///
/// The connection is only established for an authenticated session; an
/// upgrade without a valid cookie is refused with 401.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    let session = match state
        .sessions
        .session_from_value(jar.get(SESSION_COOKIE).map(|cookie| cookie.value()))
    {
        Some(session) => session,
        None => return AppError::Unauthorized("Session required".into()).into_response(),
    };

    ws.on_upgrade(move |socket| handle_socket(socket, state, session.username))
}

/// Handle an individual dashboard connection.
async fn handle_socket(socket: WebSocket, state: AppState, username: String) {
    let conn_id = Uuid::new_v4().to_string();
    let mut conn = ConnectionState::new(
        conn_id.clone(),
        username,
        state.sessions.ttl_secs(),
        state.settings.session.idle_warning_secs * 1000,
    );

    tracing::debug!(conn_id = %conn_id, "New WebSocket connection");

    // Split socket for concurrent read/write
    let (mut sender, mut receiver) = socket.split();

    // Create channel for outgoing frames
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerFrame>();

    // Spawn task to forward frames from the channel to the WebSocket
    let sender_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let text = match serde_json::to_string(&frame) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!("Failed to serialize frame: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Register with the hub; every connection starts on the default channels
    let subscriptions = state
        .hub
        .register(conn_id.clone(), conn.username.clone(), tx.clone());

    let heartbeat_interval_ms = state.settings.websocket.heartbeat_interval_ms;
    let hello = ServerFrame::Hello {
        heartbeat_interval_ms,
        subscriptions,
    };
    if tx.send(hello).is_err() {
        state.hub.unregister(&conn_id);
        sender_task.abort();
        return;
    }

    // Idle/liveness ticker; recurring, not event-driven
    let mut idle_check = interval(Duration::from_millis(state.settings.websocket.idle_tick_ms));
    idle_check.tick().await; // Skip first immediate tick
    let mut last_phase = IdlePhase::Active;

    // Main frame loop
    loop {
        tokio::select! {
            // Handle incoming frames
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        conn.touch();
                        handle_frame(&text, &mut conn, &tx, &state);
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!(conn_id = %conn.conn_id, "Connection closed");
                        break;
                    }
                    Some(Ok(Message::Ping(_))) => {
                        // Pong is handled automatically by axum
                        conn.touch();
                    }
                    Some(Err(e)) => {
                        tracing::debug!(conn_id = %conn.conn_id, error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }

            // Idle timeout and liveness checks
            _ = idle_check.tick() => {
                let phase = conn.observe_idle();
                if phase == IdlePhase::Warning && last_phase == IdlePhase::Active {
                    let _ = tx.send(ServerFrame::Warning {
                        remaining_ms: conn.remaining_ms(),
                    });
                }
                last_phase = phase;

                // Authentication is lost once the session lapses; force the disconnect
                if phase == IdlePhase::Expired {
                    tracing::info!(conn_id = %conn.conn_id, "Session expired, closing connection");
                    break;
                }

                if !conn.is_alive(heartbeat_interval_ms + HEARTBEAT_GRACE_MS) {
                    tracing::info!(conn_id = %conn.conn_id, "Heartbeat timeout, closing connection");
                    break;
                }
            }
        }
    }

    // Cleanup
    state.hub.unregister(&conn.conn_id);
    sender_task.abort();

    tracing::info!(
        username = %conn.username,
        conn_id = %conn.conn_id,
        "Dashboard connection closed"
    );
}

/// Handle a single inbound frame.
fn handle_frame(
    text: &str,
    conn: &mut ConnectionState,
    tx: &mpsc::UnboundedSender<ServerFrame>,
    state: &AppState,
) {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!(conn_id = %conn.conn_id, error = %e, "Malformed frame");
            let _ = tx.send(ServerFrame::Error {
                message: format!("Malformed frame: {e}"),
            });
            return;
        }
    };

    match frame {
        ClientFrame::Subscribe { channel } => match Channel::parse(&channel) {
            Some(channel) => {
                state.hub.subscribe(&conn.conn_id, channel);
                let _ = tx.send(ServerFrame::Subscribed { channel });
            }
            None => {
                let _ = tx.send(ServerFrame::Error {
                    message: format!("Unknown channel: {channel}"),
                });
            }
        },

        ClientFrame::Unsubscribe { channel } => match Channel::parse(&channel) {
            Some(channel) => {
                state.hub.unsubscribe(&conn.conn_id, channel);
                let _ = tx.send(ServerFrame::Unsubscribed { channel });
            }
            None => {
                let _ = tx.send(ServerFrame::Error {
                    message: format!("Unknown channel: {channel}"),
                });
            }
        },

        ClientFrame::Publish { channel, payload } => match Channel::parse(&channel) {
            Some(channel) => {
                state.hub.publish(channel, payload);
            }
            None => {
                let _ = tx.send(ServerFrame::Error {
                    message: format!("Unknown channel: {channel}"),
                });
            }
        },

        ClientFrame::Extend => {
            conn.extend_session(state.sessions.ttl_secs());
            let _ = tx.send(ServerFrame::Extended {
                expires_in: state.sessions.ttl_secs(),
            });
        }

        ClientFrame::Ping => {
            let _ = tx.send(ServerFrame::Pong);
        }
    }
}

//! WebSocket Hub
//!
//! Realtime dashboard updates via WebSocket connections.

pub mod connection;
pub mod handler;
pub mod hub;
pub mod messages;

pub use connection::ConnectionState;
pub use handler::ws_handler;
pub use hub::Hub;
pub use messages::{ClientFrame, ServerFrame};

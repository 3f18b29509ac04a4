//! # Domain Entities
//!
//! Core domain entities of the admin panel backend.
//!
//! - **AdminSession**: An authenticated administrator session derived from
//!   the session cookie
//! - **EventRecord**: A realtime event delivered over the update channel

mod event;
mod session;

// Re-export AdminSession entity and related types
pub use session::{AdminRole, AdminSession};

// Re-export realtime event record
pub use event::EventRecord;

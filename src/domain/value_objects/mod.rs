//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **Channel**: Named realtime channel a dashboard client can observe

mod channel;

pub use channel::*;

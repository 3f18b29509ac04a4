//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity.
//!
//! ## Services
//!
//! - **IdleTimer**: Idle timeout state machine driving the pre-expiry warning

mod idle;

pub use idle::*;

//! Infrastructure Layer
//!
//! Contains implementations for external-facing concerns:
//! - Prometheus metrics collection and exposition

pub mod metrics;

//! # VIW Admin Server Library
//!
//! This crate provides the backend of the VIW VPN administrative panel:
//! - Cookie-based admin session issuance and validation
//! - Route gating middleware for protected panel paths
//! - RESTful admin API endpoints (login, logout, session info)
//! - WebSocket hub pushing realtime dashboard events
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Session entities, channel value objects, idle policy
//! - **Application Layer**: Session manager service and DTOs
//! - **Infrastructure Layer**: Prometheus metrics
//! - **Presentation Layer**: HTTP handlers, middleware, and WebSocket hub
//!
//! ## Module Structure
//!
//! ```text
//! viw_admin/
//! +-- config/        Configuration management
//! +-- domain/        Session entity, channels, idle timeout policy
//! +-- application/   Session manager and DTOs
//! +-- infrastructure/ Metrics
//! +-- presentation/  HTTP routes, middleware, and WebSocket hub
//! +-- shared/        Common utilities (errors)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;

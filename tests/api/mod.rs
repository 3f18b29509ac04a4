//! REST API endpoint tests

mod auth_tests;
mod events_tests;
mod gate_tests;
mod health_tests;

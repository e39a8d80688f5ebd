//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod countries;
pub mod health;
pub mod persons;

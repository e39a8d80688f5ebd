//! Infrastructure Layer
//!
//! Contains implementations for external concerns including:
//! - Database pool and migrations (PostgreSQL)
//! - Repository implementations (PostgreSQL and in-memory)
//! - Document rendering (CSV, XLSX, PDF) and spreadsheet import
//! - Prometheus metrics

pub mod database;
pub mod documents;
pub mod metrics;
pub mod repositories;

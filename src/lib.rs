//! # Person Registry Library
//!
//! Person and country records with:
//! - A JSON HTTP API for create, edit, delete, search and sort
//! - CSV, XLSX and PDF exports of the person list
//! - Country import from an uploaded XLSX workbook
//! - PostgreSQL or in-memory storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, value objects and repository traits
//! - **Application Layer**: Services and DTOs
//! - **Infrastructure Layer**: Repositories, document rendering and metrics
//! - **Presentation Layer**: HTTP handlers, routes and middleware
//!
//! ## Module Structure
//!
//! ```text
//! person_registry/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, and repository traits
//! +-- application/    Services and DTOs
//! +-- infrastructure/ Repositories, documents, metrics
//! +-- presentation/   HTTP routes and handlers
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core records
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;

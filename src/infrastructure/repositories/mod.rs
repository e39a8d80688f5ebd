//! Repository Implementations
//!
//! Implementations of the domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgCountriesRepository** / **PgPersonsRepository** - PostgreSQL via sqlx
//! - **InMemoryCountriesRepository** / **InMemoryPersonsRepository** - process-local stores
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use person_registry::infrastructure::repositories::{
//!     InMemoryCountriesRepository, InMemoryPersonsRepository,
//! };
//!
//! let countries = Arc::new(InMemoryCountriesRepository::new());
//! let persons = Arc::new(InMemoryPersonsRepository::new(countries.clone()));
//! ```

pub mod country_repository;
pub mod in_memory;
pub mod person_repository;

pub use country_repository::PgCountriesRepository;
pub use in_memory::{InMemoryCountriesRepository, InMemoryPersonsRepository};
pub use person_repository::PgPersonsRepository;

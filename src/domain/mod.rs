//! # Domain Layer
//!
//! The domain layer contains the core records of the registry.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Person and Country records with their repository traits
//! - **value_objects**: Gender, sort options and the person search filter
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;

//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **CountriesService**: Country registration, lookup and spreadsheet import
//! - **PersonsService**: Person CRUD, search, sorting and CSV/XLSX/PDF exports

pub mod countries_service;
pub mod persons_service;

// Re-export countries service types
pub use countries_service::{CountriesService, CountriesServiceImpl, CountryError};

// Re-export persons service types
pub use persons_service::{sort_persons, PersonError, PersonsService, PersonsServiceImpl};

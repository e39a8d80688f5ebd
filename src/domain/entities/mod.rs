//! # Domain Entities
//!
//! Core domain entities. Both map directly to their database tables.
//!
//! - **Country**: a country a person can reference
//! - **Person**: a person record with an optional country reference
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod country;
mod person;

pub use country::{Country, CountriesRepository, COUNTRY_NAME_MAX_LENGTH};
pub use person::{
    age_between, Person, PersonsRepository, ADDRESS_MAX_LENGTH, DEFAULT_TAX_IDENTIFICATION_NUMBER,
    EMAIL_MAX_LENGTH, PERSON_NAME_MAX_LENGTH, TAX_IDENTIFICATION_NUMBER_LENGTH,
};

#[cfg(test)]
pub use country::MockCountriesRepository;
#[cfg(test)]
pub use person::MockPersonsRepository;

//! Person entity and repository trait.
//!
//! Maps to the `persons` table in the database schema.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Country;
use crate::domain::value_objects::PersonFilter;
use crate::shared::error::AppError;

/// Maximum length of `person_name` (VARCHAR(40)).
pub const PERSON_NAME_MAX_LENGTH: u64 = 40;

/// Maximum length of `email` (VARCHAR(40)).
pub const EMAIL_MAX_LENGTH: u64 = 40;

/// Maximum length of `address` (VARCHAR(400)).
pub const ADDRESS_MAX_LENGTH: u64 = 400;

/// Exact length enforced by the `chk_tin` check constraint.
pub const TAX_IDENTIFICATION_NUMBER_LENGTH: u64 = 8;

/// Column default for `tax_identification_number`.
pub const DEFAULT_TAX_IDENTIFICATION_NUMBER: &str = "ABC12345";

/// Represents a person record.
///
/// Maps to the `persons` table:
/// - person_id: UUID PRIMARY KEY
/// - person_name: VARCHAR(40) NULL
/// - email: VARCHAR(40) NULL
/// - date_of_birth: DATE NULL
/// - gender: VARCHAR(6) NULL
/// - country_id: UUID NULL REFERENCES countries(country_id)
/// - address: VARCHAR(400) NULL
/// - receive_news_letters: BOOLEAN NOT NULL
/// - tax_identification_number: VARCHAR(8) DEFAULT 'ABC12345' CHECK length = 8
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub person_id: Uuid,
    pub person_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,

    /// Gender name as stored (`Male`, `Female`, `Other`)
    pub gender: Option<String>,

    pub country_id: Option<Uuid>,
    pub address: Option<String>,
    pub receive_news_letters: bool,
    pub tax_identification_number: Option<String>,

    /// Joined country record. Populated by repository reads, ignored on writes.
    #[serde(skip)]
    pub country: Option<Country>,
}

impl Person {
    /// Age in whole years on `today`, rounded from days / 365.25.
    pub fn age_on(&self, today: NaiveDate) -> Option<i64> {
        self.date_of_birth.map(|dob| age_between(dob, today))
    }

    /// Name of the joined country, if any.
    pub fn country_name(&self) -> Option<&str> {
        self.country.as_ref().map(|c| c.country_name.as_str())
    }
}

impl Default for Person {
    fn default() -> Self {
        Self {
            person_id: Uuid::nil(),
            person_name: None,
            email: None,
            date_of_birth: None,
            gender: None,
            country_id: None,
            address: None,
            receive_news_letters: false,
            tax_identification_number: None,
            country: None,
        }
    }
}

/// Age computed as `round(days / 365.25)`.
pub fn age_between(date_of_birth: NaiveDate, today: NaiveDate) -> i64 {
    let days = (today - date_of_birth).num_days() as f64;
    (days / 365.25).round() as i64
}

/// Repository trait for Person data access operations.
///
/// Reads return persons with `country` joined.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonsRepository: Send + Sync {
    /// Persist a new person and return the stored record.
    async fn add_person(&self, person: &Person) -> Result<Person, AppError>;

    /// All stored persons.
    async fn get_all_persons(&self) -> Result<Vec<Person>, AppError>;

    /// Find a person by ID.
    async fn get_person_by_person_id(&self, person_id: Uuid) -> Result<Option<Person>, AppError>;

    /// Persons matching the given filter. Null fields never match.
    async fn get_filtered_persons(&self, filter: &PersonFilter) -> Result<Vec<Person>, AppError>;

    /// Overwrite every mutable column of an existing person.
    async fn update_person(&self, person: &Person) -> Result<Person, AppError>;

    /// Remove a person. Returns `false` when nothing was deleted.
    async fn delete_person_by_person_id(&self, person_id: Uuid) -> Result<bool, AppError>;
}

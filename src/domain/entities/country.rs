//! Country entity and repository trait.
//!
//! Maps to the `countries` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Maximum length of `country_name` in characters (VARCHAR(100)).
pub const COUNTRY_NAME_MAX_LENGTH: usize = 100;

/// A country a person can reference.
///
/// Maps to the `countries` table:
/// - country_id: UUID PRIMARY KEY
/// - country_name: VARCHAR(100) NOT NULL
///
/// Name uniqueness is an application rule checked when adding; the table
/// carries no unique index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country_id: Uuid,
    pub country_name: String,
}

impl Country {
    pub fn new(country_name: impl Into<String>) -> Self {
        Self {
            country_id: Uuid::new_v4(),
            country_name: country_name.into(),
        }
    }
}

/// Repository trait for Country data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountriesRepository: Send + Sync {
    /// Persist a new country and return it.
    async fn add_country(&self, country: &Country) -> Result<Country, AppError>;

    /// All stored countries, ordered by name (code point order).
    async fn get_all_countries(&self) -> Result<Vec<Country>, AppError>;

    /// Find a country by its ID.
    async fn get_country_by_country_id(&self, country_id: Uuid) -> Result<Option<Country>, AppError>;

    /// Find a country by exact (case-sensitive) name.
    async fn get_country_by_country_name(&self, country_name: &str) -> Result<Option<Country>, AppError>;
}

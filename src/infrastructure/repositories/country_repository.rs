//! Country Repository Implementation
//!
//! PostgreSQL implementation of the CountriesRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{CountriesRepository, Country};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CountryRow {
    country_id: Uuid,
    country_name: String,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Self {
            country_id: row.country_id,
            country_name: row.country_name,
        }
    }
}

/// PostgreSQL country repository implementation.
#[derive(Clone)]
pub struct PgCountriesRepository {
    pool: PgPool,
}

impl PgCountriesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountriesRepository for PgCountriesRepository {
    async fn add_country(&self, country: &Country) -> Result<Country, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            INSERT INTO countries (country_id, country_name)
            VALUES ($1, $2)
            RETURNING country_id, country_name
            "#,
        )
        .bind(country.country_id)
        .bind(&country.country_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_all_countries(&self) -> Result<Vec<Country>, AppError> {
        let rows = sqlx::query_as::<_, CountryRow>(
            r#"SELECT country_id, country_name FROM countries ORDER BY country_name COLLATE "C""#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Country::from).collect())
    }

    async fn get_country_by_country_id(&self, country_id: Uuid) -> Result<Option<Country>, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            "SELECT country_id, country_name FROM countries WHERE country_id = $1",
        )
        .bind(country_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Country::from))
    }

    async fn get_country_by_country_name(&self, country_name: &str) -> Result<Option<Country>, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            "SELECT country_id, country_name FROM countries WHERE country_name = $1 LIMIT 1",
        )
        .bind(country_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Country::from))
    }
}

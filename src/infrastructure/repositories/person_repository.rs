//! Person Repository Implementation
//!
//! PostgreSQL implementation of the PersonsRepository trait.
//! Reads join `countries` so the domain Person carries its country.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Country, Person, PersonFilter, PersonSearchField, PersonsRepository};
use crate::shared::error::AppError;

const SELECT_PERSONS: &str = r#"
    SELECT p.person_id, p.person_name, p.email, p.date_of_birth, p.gender,
           p.country_id, p.address, p.receive_news_letters,
           p.tax_identification_number, c.country_name
    FROM persons p
    LEFT JOIN countries c ON c.country_id = p.country_id
"#;

/// Database row: a person plus the joined country name.
#[derive(Debug, sqlx::FromRow)]
struct PersonRow {
    person_id: Uuid,
    person_name: Option<String>,
    email: Option<String>,
    date_of_birth: Option<NaiveDate>,
    gender: Option<String>,
    country_id: Option<Uuid>,
    address: Option<String>,
    receive_news_letters: bool,
    tax_identification_number: Option<String>,
    country_name: Option<String>,
}

impl PersonRow {
    fn into_person(self) -> Person {
        let country = match (self.country_id, self.country_name) {
            (Some(country_id), Some(country_name)) => Some(Country {
                country_id,
                country_name,
            }),
            _ => None,
        };

        Person {
            person_id: self.person_id,
            person_name: self.person_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            country_id: self.country_id,
            address: self.address,
            receive_news_letters: self.receive_news_letters,
            tax_identification_number: self.tax_identification_number,
            country,
        }
    }
}

/// Bind value of a translated filter.
#[derive(Debug, PartialEq)]
enum FilterBind {
    Text(String),
    Age(i64),
}

/// Translate a filter into a `WHERE` clause with a single `$1` parameter.
///
/// Returns `None` when the filter can match nobody (non-numeric age).
fn filter_clause(filter: &PersonFilter) -> Option<(&'static str, FilterBind)> {
    let pattern = || FilterBind::Text(format!("%{}%", escape_like(&filter.term)));

    let clause = match filter.field {
        PersonSearchField::PersonName => ("p.person_name ILIKE $1", pattern()),
        PersonSearchField::Email => ("p.email ILIKE $1", pattern()),
        PersonSearchField::Address => ("p.address ILIKE $1", pattern()),
        PersonSearchField::CountryID => ("c.country_name ILIKE $1", pattern()),
        PersonSearchField::DateOfBirth => (
            "to_char(p.date_of_birth, 'YYYY FMMonth DD') ILIKE $1",
            pattern(),
        ),
        PersonSearchField::Gender => (
            "LOWER(p.gender) = LOWER($1)",
            FilterBind::Text(filter.term.clone()),
        ),
        PersonSearchField::Age => (
            "ROUND((CURRENT_DATE - p.date_of_birth) / 365.25) = $1",
            FilterBind::Age(filter.age_term()?),
        ),
    };

    Some(clause)
}

/// Escape `LIKE` wildcards so the term is matched literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Map constraint violations to client errors.
fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::BadRequest("Referenced country does not exist".to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
            AppError::BadRequest("Tax identification number must be 8 characters".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL person repository implementation.
#[derive(Clone)]
pub struct PgPersonsRepository {
    pool: PgPool,
}

impl PgPersonsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, person_id: Uuid) -> Result<Option<Person>, AppError> {
        let sql = format!("{SELECT_PERSONS} WHERE p.person_id = $1");
        let row = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(person_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PersonRow::into_person))
    }
}

#[async_trait]
impl PersonsRepository for PgPersonsRepository {
    async fn add_person(&self, person: &Person) -> Result<Person, AppError> {
        sqlx::query(
            r#"
            INSERT INTO persons (person_id, person_name, email, date_of_birth, gender,
                                 country_id, address, receive_news_letters,
                                 tax_identification_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(person.person_id)
        .bind(&person.person_name)
        .bind(&person.email)
        .bind(person.date_of_birth)
        .bind(&person.gender)
        .bind(person.country_id)
        .bind(&person.address)
        .bind(person.receive_news_letters)
        .bind(&person.tax_identification_number)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        self.fetch_by_id(person.person_id).await?.ok_or_else(|| {
            AppError::Internal(format!("Person {} vanished after insert", person.person_id))
        })
    }

    async fn get_all_persons(&self) -> Result<Vec<Person>, AppError> {
        let rows = sqlx::query_as::<_, PersonRow>(SELECT_PERSONS)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PersonRow::into_person).collect())
    }

    async fn get_person_by_person_id(&self, person_id: Uuid) -> Result<Option<Person>, AppError> {
        self.fetch_by_id(person_id).await
    }

    async fn get_filtered_persons(&self, filter: &PersonFilter) -> Result<Vec<Person>, AppError> {
        let Some((clause, bind)) = filter_clause(filter) else {
            return Ok(Vec::new());
        };

        let sql = format!("{SELECT_PERSONS} WHERE {clause}");
        let query = sqlx::query_as::<_, PersonRow>(&sql);
        let query = match bind {
            FilterBind::Text(text) => query.bind(text),
            FilterBind::Age(age) => query.bind(age),
        };

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(PersonRow::into_person).collect())
    }

    async fn update_person(&self, person: &Person) -> Result<Person, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE persons
            SET person_name = $2,
                email = $3,
                date_of_birth = $4,
                gender = $5,
                country_id = $6,
                address = $7,
                receive_news_letters = $8,
                tax_identification_number = $9
            WHERE person_id = $1
            "#,
        )
        .bind(person.person_id)
        .bind(&person.person_name)
        .bind(&person.email)
        .bind(person.date_of_birth)
        .bind(&person.gender)
        .bind(person.country_id)
        .bind(&person.address)
        .bind(person.receive_news_letters)
        .bind(&person.tax_identification_number)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Person with id {} not found",
                person.person_id
            )));
        }

        self.fetch_by_id(person.person_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Person with id {} not found", person.person_id))
        })
    }

    async fn delete_person_by_person_id(&self, person_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM persons WHERE person_id = $1")
            .bind(person_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

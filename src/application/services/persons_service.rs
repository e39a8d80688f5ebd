//! Persons Service
//!
//! Handles person CRUD, search, sorting and exports.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::application::dto::{
    PersonAddRequest, PersonResponse, PersonUpdateRequest, PERSON_REQUEST_FIELDS,
};
use crate::domain::{
    PersonFilter, PersonSearchField, PersonSortField, PersonsRepository, SortOrderOptions,
};
use crate::infrastructure::documents::{csv, excel, pdf, DocumentError};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;

/// Persons service trait
#[async_trait]
pub trait PersonsService: Send + Sync {
    /// Validate and store a new person
    async fn add_person(&self, request: Option<PersonAddRequest>)
        -> Result<PersonResponse, PersonError>;

    /// Get every stored person
    async fn get_all_persons(&self) -> Result<Vec<PersonResponse>, PersonError>;

    /// Get a person by ID. `None` when the ID is absent or unknown.
    async fn get_person_by_person_id(
        &self,
        person_id: Option<Uuid>,
    ) -> Result<Option<PersonResponse>, PersonError>;

    /// Persons whose `search_by` field matches `search_string`.
    ///
    /// Returns everybody when either argument is empty or the field is unknown.
    async fn get_filtered_persons(
        &self,
        search_by: Option<&str>,
        search_string: Option<&str>,
    ) -> Result<Vec<PersonResponse>, PersonError>;

    /// Sort an already fetched list. Unknown fields leave the order unchanged.
    fn get_sorted_persons(
        &self,
        persons: Vec<PersonResponse>,
        sort_by: Option<&str>,
        sort_order: SortOrderOptions,
    ) -> Vec<PersonResponse>;

    /// Overwrite every mutable field of an existing person
    async fn update_person(
        &self,
        request: Option<PersonUpdateRequest>,
    ) -> Result<PersonResponse, PersonError>;

    /// Delete a person. `false` when the ID is unknown.
    async fn delete_person(&self, person_id: Option<Uuid>) -> Result<bool, PersonError>;

    /// All persons as CSV
    async fn get_persons_csv(&self) -> Result<Vec<u8>, PersonError>;

    /// All persons as an `.xlsx` workbook
    async fn get_persons_excel(&self) -> Result<Vec<u8>, PersonError>;

    /// All persons as a landscape PDF table
    async fn get_persons_pdf(&self) -> Result<Vec<u8>, PersonError>;
}

/// Person service errors
#[derive(Debug, thiserror::Error)]
pub enum PersonError {
    #[error("{0} can't be null")]
    ArgumentNull(&'static str),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PersonError> for AppError {
    fn from(e: PersonError) -> Self {
        match e {
            PersonError::Validation(errors) => validation_error(errors, PERSON_REQUEST_FIELDS),
            PersonError::Internal(msg) => AppError::Internal(msg),
            e => AppError::BadRequest(e.to_string()),
        }
    }
}

/// Constraint violations reported by a repository are the caller's fault.
fn repository_error(e: AppError) -> PersonError {
    match e {
        AppError::BadRequest(msg) | AppError::NotFound(msg) => PersonError::InvalidArgument(msg),
        e => PersonError::Internal(e.to_string()),
    }
}

fn document_error(e: DocumentError) -> PersonError {
    PersonError::Internal(e.to_string())
}

/// PersonsService implementation
pub struct PersonsServiceImpl<P>
where
    P: PersonsRepository,
{
    person_repo: Arc<P>,
}

impl<P> PersonsServiceImpl<P>
where
    P: PersonsRepository,
{
    pub fn new(person_repo: Arc<P>) -> Self {
        Self { person_repo }
    }
}

#[async_trait]
impl<P> PersonsService for PersonsServiceImpl<P>
where
    P: PersonsRepository + 'static,
{
    async fn add_person(
        &self,
        request: Option<PersonAddRequest>,
    ) -> Result<PersonResponse, PersonError> {
        let request = request.ok_or(PersonError::ArgumentNull("Person add request"))?;
        request.validate().map_err(PersonError::Validation)?;

        let person = self
            .person_repo
            .add_person(&request.to_person())
            .await
            .map_err(repository_error)?;

        tracing::info!(person_id = %person.person_id, "Person added");

        Ok(PersonResponse::from(person))
    }

    async fn get_all_persons(&self) -> Result<Vec<PersonResponse>, PersonError> {
        let persons = self
            .person_repo
            .get_all_persons()
            .await
            .map_err(repository_error)?;

        Ok(persons.into_iter().map(PersonResponse::from).collect())
    }

    async fn get_person_by_person_id(
        &self,
        person_id: Option<Uuid>,
    ) -> Result<Option<PersonResponse>, PersonError> {
        let Some(person_id) = person_id else {
            return Ok(None);
        };

        let person = self
            .person_repo
            .get_person_by_person_id(person_id)
            .await
            .map_err(repository_error)?;

        Ok(person.map(PersonResponse::from))
    }

    async fn get_filtered_persons(
        &self,
        search_by: Option<&str>,
        search_string: Option<&str>,
    ) -> Result<Vec<PersonResponse>, PersonError> {
        let (Some(search_by), Some(search_string)) = (search_by, search_string) else {
            return self.get_all_persons().await;
        };
        if search_by.is_empty() || search_string.is_empty() {
            return self.get_all_persons().await;
        }

        let Some(field) = PersonSearchField::parse(search_by) else {
            tracing::debug!(search_by, "Unknown search field, returning all persons");
            return self.get_all_persons().await;
        };

        let persons = self
            .person_repo
            .get_filtered_persons(&PersonFilter::new(field, search_string))
            .await
            .map_err(repository_error)?;

        Ok(persons.into_iter().map(PersonResponse::from).collect())
    }

    fn get_sorted_persons(
        &self,
        persons: Vec<PersonResponse>,
        sort_by: Option<&str>,
        sort_order: SortOrderOptions,
    ) -> Vec<PersonResponse> {
        match sort_by.and_then(PersonSortField::parse) {
            Some(field) => sort_persons(persons, field, sort_order),
            None => persons,
        }
    }

    async fn update_person(
        &self,
        request: Option<PersonUpdateRequest>,
    ) -> Result<PersonResponse, PersonError> {
        let request = request.ok_or(PersonError::ArgumentNull("Person update request"))?;
        request.validate().map_err(PersonError::Validation)?;

        let existing = self
            .person_repo
            .get_person_by_person_id(request.person_id)
            .await
            .map_err(repository_error)?
            .ok_or_else(|| {
                PersonError::InvalidArgument("Given person id doesn't exist".into())
            })?;

        let updated = self
            .person_repo
            .update_person(&request.apply_to(&existing))
            .await
            .map_err(repository_error)?;

        tracing::info!(person_id = %updated.person_id, "Person updated");

        Ok(PersonResponse::from(updated))
    }

    async fn delete_person(&self, person_id: Option<Uuid>) -> Result<bool, PersonError> {
        let person_id = person_id.ok_or(PersonError::ArgumentNull("Person id"))?;

        let existing = self
            .person_repo
            .get_person_by_person_id(person_id)
            .await
            .map_err(repository_error)?;
        if existing.is_none() {
            return Ok(false);
        }

        let deleted = self
            .person_repo
            .delete_person_by_person_id(person_id)
            .await
            .map_err(repository_error)?;

        if deleted {
            tracing::info!(%person_id, "Person deleted");
        }

        Ok(deleted)
    }

    async fn get_persons_csv(&self) -> Result<Vec<u8>, PersonError> {
        let persons = self.get_all_persons().await?;
        csv::persons_to_csv(&persons).map_err(document_error)
    }

    async fn get_persons_excel(&self) -> Result<Vec<u8>, PersonError> {
        let persons = self.get_all_persons().await?;
        excel::persons_to_xlsx(&persons).map_err(document_error)
    }

    async fn get_persons_pdf(&self) -> Result<Vec<u8>, PersonError> {
        let persons = self.get_all_persons().await?;
        pdf::persons_to_pdf(&persons).map_err(document_error)
    }
}

/// Stable sort of `persons` by `field`.
///
/// Text compares ordinally ignoring case; a missing value sorts before any
/// present one. Descending reverses the comparison, so ties keep their
/// input order either way.
pub fn sort_persons(
    mut persons: Vec<PersonResponse>,
    field: PersonSortField,
    sort_order: SortOrderOptions,
) -> Vec<PersonResponse> {
    let compare = |a: &PersonResponse, b: &PersonResponse| -> Ordering {
        match field {
            PersonSortField::PersonName => {
                compare_ignore_case(a.person_name.as_deref(), b.person_name.as_deref())
            }
            PersonSortField::Email => compare_ignore_case(a.email.as_deref(), b.email.as_deref()),
            PersonSortField::Address => {
                compare_ignore_case(a.address.as_deref(), b.address.as_deref())
            }
            PersonSortField::Country => {
                compare_ignore_case(a.country.as_deref(), b.country.as_deref())
            }
            PersonSortField::Gender => compare_ignore_case(a.gender.as_deref(), b.gender.as_deref()),
            PersonSortField::Age => a.age.cmp(&b.age),
            PersonSortField::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
            PersonSortField::ReceiveNewsLetters => {
                a.receive_news_letters.cmp(&b.receive_news_letters)
            }
        }
    };

    match sort_order {
        SortOrderOptions::Asc => persons.sort_by(compare),
        SortOrderOptions::Desc => persons.sort_by(|a, b| compare(b, a)),
    }
    persons
}

fn compare_ignore_case(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .chars()
            .flat_map(char::to_uppercase)
            .cmp(b.chars().flat_map(char::to_uppercase)),
    }
}

//! Countries Service
//!
//! Handles country registration, lookup and spreadsheet import.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::{CountryAddRequest, CountryResponse};
use crate::domain::{CountriesRepository, COUNTRY_NAME_MAX_LENGTH};
use crate::infrastructure::documents::excel;
use crate::shared::error::AppError;

/// Countries service trait
#[async_trait]
pub trait CountriesService: Send + Sync {
    /// Add a country with a unique, non-empty name
    async fn add_country(
        &self,
        request: Option<CountryAddRequest>,
    ) -> Result<CountryResponse, CountryError>;

    /// Get every stored country
    async fn get_all_countries(&self) -> Result<Vec<CountryResponse>, CountryError>;

    /// Get a country by ID. `None` when the ID is absent or unknown.
    async fn get_country_by_country_id(
        &self,
        country_id: Option<Uuid>,
    ) -> Result<Option<CountryResponse>, CountryError>;

    /// Insert the country names listed in an `.xlsx` workbook, returning how
    /// many were new.
    async fn upload_countries_from_excel_file(&self, bytes: &[u8]) -> Result<usize, CountryError>;
}

/// Country service errors
#[derive(Debug, thiserror::Error)]
pub enum CountryError {
    #[error("{0} can't be null")]
    ArgumentNull(&'static str),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid spreadsheet: {0}")]
    InvalidFile(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CountryError> for AppError {
    fn from(e: CountryError) -> Self {
        match e {
            CountryError::Internal(msg) => AppError::Internal(msg),
            e => AppError::BadRequest(e.to_string()),
        }
    }
}

fn exceeds_max_length(country_name: &str) -> bool {
    country_name.chars().count() > COUNTRY_NAME_MAX_LENGTH
}

/// CountriesService implementation
pub struct CountriesServiceImpl<C>
where
    C: CountriesRepository,
{
    country_repo: Arc<C>,
}

impl<C> CountriesServiceImpl<C>
where
    C: CountriesRepository,
{
    pub fn new(country_repo: Arc<C>) -> Self {
        Self { country_repo }
    }

    async fn name_exists(&self, country_name: &str) -> Result<bool, CountryError> {
        let existing = self
            .country_repo
            .get_country_by_country_name(country_name)
            .await
            .map_err(|e| CountryError::Internal(e.to_string()))?;

        Ok(existing.is_some())
    }
}

#[async_trait]
impl<C> CountriesService for CountriesServiceImpl<C>
where
    C: CountriesRepository + 'static,
{
    async fn add_country(
        &self,
        request: Option<CountryAddRequest>,
    ) -> Result<CountryResponse, CountryError> {
        let request = request.ok_or(CountryError::ArgumentNull("Country add request"))?;

        let country_name = match request.country_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(CountryError::InvalidArgument(
                    "Country name can't be empty".into(),
                ))
            }
        };

        if exceeds_max_length(country_name) {
            return Err(CountryError::InvalidArgument(format!(
                "Country name must be at most {} characters",
                COUNTRY_NAME_MAX_LENGTH
            )));
        }

        if self.name_exists(country_name).await? {
            return Err(CountryError::InvalidArgument(
                "Given country name already exists".into(),
            ));
        }

        let country = self
            .country_repo
            .add_country(&request.to_country())
            .await
            .map_err(|e| CountryError::Internal(e.to_string()))?;

        tracing::info!(country_id = %country.country_id, "Country added");

        Ok(CountryResponse::from(country))
    }

    async fn get_all_countries(&self) -> Result<Vec<CountryResponse>, CountryError> {
        let countries = self
            .country_repo
            .get_all_countries()
            .await
            .map_err(|e| CountryError::Internal(e.to_string()))?;

        Ok(countries.into_iter().map(CountryResponse::from).collect())
    }

    async fn get_country_by_country_id(
        &self,
        country_id: Option<Uuid>,
    ) -> Result<Option<CountryResponse>, CountryError> {
        let Some(country_id) = country_id else {
            return Ok(None);
        };

        let country = self
            .country_repo
            .get_country_by_country_id(country_id)
            .await
            .map_err(|e| CountryError::Internal(e.to_string()))?;

        Ok(country.map(CountryResponse::from))
    }

    async fn upload_countries_from_excel_file(&self, bytes: &[u8]) -> Result<usize, CountryError> {
        let names = excel::read_country_names(bytes)
            .map_err(|e| CountryError::InvalidFile(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut inserted = 0;

        for name in names {
            if exceeds_max_length(&name) {
                tracing::warn!(country_name = %name, "Skipping country name over the length limit");
                continue;
            }
            if !seen.insert(name.clone()) || self.name_exists(&name).await? {
                continue;
            }

            let request = CountryAddRequest {
                country_name: Some(name),
            };
            self.country_repo
                .add_country(&request.to_country())
                .await
                .map_err(|e| CountryError::Internal(e.to_string()))?;
            inserted += 1;
        }

        tracing::info!(inserted, "Countries imported from spreadsheet");

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Country, MockCountriesRepository};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;

    fn service(repo: MockCountriesRepository) -> CountriesServiceImpl<MockCountriesRepository> {
        CountriesServiceImpl::new(Arc::new(repo))
    }

    fn request(name: Option<&str>) -> Option<CountryAddRequest> {
        Some(CountryAddRequest {
            country_name: name.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_add_country_null_request() {
        let result = service(MockCountriesRepository::new()).add_country(None).await;
        assert!(matches!(result, Err(CountryError::ArgumentNull(_))));
    }

    #[tokio::test]
    async fn test_add_country_empty_name() {
        let svc = service(MockCountriesRepository::new());

        let missing = svc.add_country(request(None)).await;
        assert!(matches!(missing, Err(CountryError::InvalidArgument(_))));

        let empty = svc.add_country(request(Some(""))).await;
        assert!(matches!(empty, Err(CountryError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_add_country_name_too_long() {
        let mut repo = MockCountriesRepository::new();
        repo.expect_add_country().never();

        let name = "N".repeat(COUNTRY_NAME_MAX_LENGTH + 1);
        let result = service(repo).add_country(request(Some(name.as_str()))).await;
        assert!(matches!(result, Err(CountryError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_add_country_name_at_limit() {
        let mut repo = MockCountriesRepository::new();
        repo.expect_get_country_by_country_name()
            .returning(|_| Ok(None));
        repo.expect_add_country()
            .times(1)
            .returning(|country| Ok(country.clone()));

        let name = "é".repeat(COUNTRY_NAME_MAX_LENGTH);
        let response = service(repo).add_country(request(Some(name.as_str()))).await.unwrap();
        assert_eq!(response.country_name.chars().count(), COUNTRY_NAME_MAX_LENGTH);
    }

    #[tokio::test]
    async fn test_add_country_duplicate_name() {
        let mut repo = MockCountriesRepository::new();
        repo.expect_get_country_by_country_name()
            .with(eq("Japan"))
            .returning(|name| Ok(Some(Country::new(name))));
        repo.expect_add_country().never();

        let result = service(repo).add_country(request(Some("Japan"))).await;
        assert!(matches!(result, Err(CountryError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_add_country_success() {
        let mut repo = MockCountriesRepository::new();
        repo.expect_get_country_by_country_name()
            .returning(|_| Ok(None));
        repo.expect_add_country()
            .times(1)
            .returning(|country| Ok(country.clone()));

        let response = service(repo)
            .add_country(request(Some("Japan")))
            .await
            .unwrap();

        assert_eq!(response.country_name, "Japan");
        assert!(!response.country_id.is_nil());
    }

    #[tokio::test]
    async fn test_get_country_by_missing_id_is_none() {
        let svc = service(MockCountriesRepository::new());
        assert_eq!(svc.get_country_by_country_id(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_country_by_id() {
        let country = Country::new("Iran");
        let id = country.country_id;

        let mut repo = MockCountriesRepository::new();
        repo.expect_get_country_by_country_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(country.clone())));

        let found = service(repo).get_country_by_country_id(Some(id)).await.unwrap();
        assert_eq!(found.map(|c| c.country_name), Some("Iran".to_string()));
    }

    #[tokio::test]
    async fn test_upload_skips_existing_and_repeated_names() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "CountryName").unwrap();
        sheet.write_string(1, 0, "Japan").unwrap();
        sheet.write_string(2, 0, "Iran").unwrap();
        sheet.write_string(3, 0, "Japan").unwrap();
        sheet.write_string(4, 0, "Peru").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let mut repo = MockCountriesRepository::new();
        repo.expect_get_country_by_country_name()
            .returning(|name| Ok((name == "Iran").then(|| Country::new(name))));
        repo.expect_add_country()
            .times(2)
            .returning(|country| Ok(country.clone()));

        let inserted = service(repo)
            .upload_countries_from_excel_file(&bytes)
            .await
            .unwrap();
        assert_eq!(inserted, 2);
    }

    #[tokio::test]
    async fn test_upload_skips_names_over_the_limit() {
        let long_name = "N".repeat(COUNTRY_NAME_MAX_LENGTH + 1);
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "CountryName").unwrap();
        sheet.write_string(1, 0, long_name.as_str()).unwrap();
        sheet.write_string(2, 0, "Peru").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let mut repo = MockCountriesRepository::new();
        repo.expect_get_country_by_country_name()
            .returning(|_| Ok(None));
        repo.expect_add_country()
            .withf(|country| country.country_name == "Peru")
            .times(1)
            .returning(|country| Ok(country.clone()));

        let inserted = service(repo)
            .upload_countries_from_excel_file(&bytes)
            .await
            .unwrap();
        assert_eq!(inserted, 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_workbook() {
        let result = service(MockCountriesRepository::new())
            .upload_countries_from_excel_file(b"not a workbook")
            .await;
        assert!(matches!(result, Err(CountryError::InvalidFile(_))));
    }
}

//! In-Memory Repository Implementations
//!
//! Process-local stores backed by `parking_lot::RwLock<Vec<_>>`. They keep
//! insertion order, enforce the same foreign-key and tax id rules as the
//! PostgreSQL schema, and are used by the `memory` storage backend and the
//! integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::{
    CountriesRepository, Country, Person, PersonFilter, PersonsRepository,
    TAX_IDENTIFICATION_NUMBER_LENGTH,
};
use crate::shared::error::AppError;

/// In-memory country store.
#[derive(Default)]
pub struct InMemoryCountriesRepository {
    countries: RwLock<Vec<Country>>,
}

impl InMemoryCountriesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `countries`.
    pub fn with_countries(countries: Vec<Country>) -> Self {
        Self {
            countries: RwLock::new(countries),
        }
    }

    fn find(&self, country_id: Uuid) -> Option<Country> {
        self.countries
            .read()
            .iter()
            .find(|c| c.country_id == country_id)
            .cloned()
    }
}

#[async_trait]
impl CountriesRepository for InMemoryCountriesRepository {
    async fn add_country(&self, country: &Country) -> Result<Country, AppError> {
        self.countries.write().push(country.clone());
        Ok(country.clone())
    }

    async fn get_all_countries(&self) -> Result<Vec<Country>, AppError> {
        let mut countries = self.countries.read().clone();
        countries.sort_by(|a, b| a.country_name.cmp(&b.country_name));
        Ok(countries)
    }

    async fn get_country_by_country_id(&self, country_id: Uuid) -> Result<Option<Country>, AppError> {
        Ok(self.find(country_id))
    }

    async fn get_country_by_country_name(&self, country_name: &str) -> Result<Option<Country>, AppError> {
        Ok(self
            .countries
            .read()
            .iter()
            .find(|c| c.country_name == country_name)
            .cloned())
    }
}

/// In-memory person store. Joins countries from the shared country store.
pub struct InMemoryPersonsRepository {
    persons: RwLock<Vec<Person>>,
    countries: Arc<InMemoryCountriesRepository>,
}

impl InMemoryPersonsRepository {
    pub fn new(countries: Arc<InMemoryCountriesRepository>) -> Self {
        Self {
            persons: RwLock::new(Vec::new()),
            countries,
        }
    }

    fn with_country(&self, mut person: Person) -> Person {
        person.country = person.country_id.and_then(|id| self.countries.find(id));
        person
    }

    /// Mirror of the table constraints: country FK and `chk_tin`.
    fn check_constraints(&self, person: &Person) -> Result<(), AppError> {
        if let Some(country_id) = person.country_id {
            if self.countries.find(country_id).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Country with id {} does not exist",
                    country_id
                )));
            }
        }
        if let Some(tin) = &person.tax_identification_number {
            if tin.chars().count() as u64 != TAX_IDENTIFICATION_NUMBER_LENGTH {
                return Err(AppError::BadRequest(format!(
                    "Tax identification number must be {} characters",
                    TAX_IDENTIFICATION_NUMBER_LENGTH
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PersonsRepository for InMemoryPersonsRepository {
    async fn add_person(&self, person: &Person) -> Result<Person, AppError> {
        self.check_constraints(person)?;

        let mut stored = person.clone();
        stored.country = None;
        self.persons.write().push(stored.clone());

        Ok(self.with_country(stored))
    }

    async fn get_all_persons(&self) -> Result<Vec<Person>, AppError> {
        let persons = self.persons.read().clone();
        Ok(persons.into_iter().map(|p| self.with_country(p)).collect())
    }

    async fn get_person_by_person_id(&self, person_id: Uuid) -> Result<Option<Person>, AppError> {
        let person = self
            .persons
            .read()
            .iter()
            .find(|p| p.person_id == person_id)
            .cloned();
        Ok(person.map(|p| self.with_country(p)))
    }

    async fn get_filtered_persons(&self, filter: &PersonFilter) -> Result<Vec<Person>, AppError> {
        let today = Utc::now().date_naive();
        let persons = self.get_all_persons().await?;
        Ok(persons
            .into_iter()
            .filter(|p| filter.matches(p, today))
            .collect())
    }

    async fn update_person(&self, person: &Person) -> Result<Person, AppError> {
        self.check_constraints(person)?;

        let updated = {
            let mut persons = self.persons.write();
            let existing = persons
                .iter_mut()
                .find(|p| p.person_id == person.person_id)
                .ok_or_else(|| {
                    AppError::NotFound(format!("Person with id {} not found", person.person_id))
                })?;

            existing.person_name = person.person_name.clone();
            existing.email = person.email.clone();
            existing.date_of_birth = person.date_of_birth;
            existing.gender = person.gender.clone();
            existing.country_id = person.country_id;
            existing.address = person.address.clone();
            existing.receive_news_letters = person.receive_news_letters;
            existing.tax_identification_number = person.tax_identification_number.clone();
            existing.clone()
        };

        Ok(self.with_country(updated))
    }

    async fn delete_person_by_person_id(&self, person_id: Uuid) -> Result<bool, AppError> {
        let mut persons = self.persons.write();
        let before = persons.len();
        persons.retain(|p| p.person_id != person_id);
        Ok(persons.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonSearchField;

    fn repositories() -> (Arc<InMemoryCountriesRepository>, InMemoryPersonsRepository) {
        let countries = Arc::new(InMemoryCountriesRepository::new());
        let persons = InMemoryPersonsRepository::new(countries.clone());
        (countries, persons)
    }

    fn person(name: &str, country_id: Option<Uuid>) -> Person {
        Person {
            person_id: Uuid::new_v4(),
            person_name: Some(name.into()),
            country_id,
            ..Person::default()
        }
    }

    #[tokio::test]
    async fn test_reads_join_country() {
        let (countries, persons) = repositories();
        let iran = countries.add_country(&Country::new("Iran")).await.unwrap();

        let added = persons.add_person(&person("Mahdi", Some(iran.country_id))).await.unwrap();
        assert_eq!(added.country_name(), Some("Iran"));

        let fetched = persons.get_person_by_person_id(added.person_id).await.unwrap().unwrap();
        assert_eq!(fetched.country, Some(iran));
    }

    #[tokio::test]
    async fn test_countries_are_listed_by_name() {
        let (countries, _) = repositories();
        for name in ["Peru", "Chile", "Iran"] {
            countries.add_country(&Country::new(name)).await.unwrap();
        }

        let names: Vec<String> = countries
            .get_all_countries()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.country_name)
            .collect();
        assert_eq!(names, vec!["Chile", "Iran", "Peru"]);
    }

    #[tokio::test]
    async fn test_unknown_country_is_rejected() {
        let (_, persons) = repositories();
        let result = persons.add_person(&person("Ali", Some(Uuid::new_v4()))).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_tax_id_length_is_enforced() {
        let (_, persons) = repositories();
        let mut p = person("Ali", None);
        p.tax_identification_number = Some("SHORT".into());
        assert!(persons.add_person(&p).await.is_err());
    }

    #[tokio::test]
    async fn test_filter_and_delete() {
        let (_, persons) = repositories();
        for name in ["Mahdi", "Rahman", "Ali"] {
            persons.add_person(&person(name, None)).await.unwrap();
        }

        let filter = PersonFilter::new(PersonSearchField::PersonName, "ma");
        let matched = persons.get_filtered_persons(&filter).await.unwrap();
        let names: Vec<_> = matched.iter().filter_map(|p| p.person_name.as_deref()).collect();
        assert_eq!(names, vec!["Mahdi", "Rahman"]);

        let id = matched[0].person_id;
        assert!(persons.delete_person_by_person_id(id).await.unwrap());
        assert!(!persons.delete_person_by_person_id(id).await.unwrap());
        assert_eq!(persons.get_all_persons().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown_person_is_not_found() {
        let (_, persons) = repositories();
        let result = persons.update_person(&person("Ghost", None)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}

//! Response DTOs
//!
//! Read-only projections of the entities returned by the services.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::request::PersonUpdateRequest;
use crate::domain::{Country, GenderOptions, Person, SortOrderOptions};

/// Country response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryResponse {
    pub country_id: Uuid,
    pub country_name: String,
}

impl From<Country> for CountryResponse {
    fn from(country: Country) -> Self {
        Self {
            country_id: country.country_id,
            country_name: country.country_name,
        }
    }
}

/// Person response with derived `age` and resolved `country` name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonResponse {
    pub person_id: Uuid,
    pub person_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub country_id: Option<Uuid>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub receive_news_letters: bool,
}

impl PersonResponse {
    /// Project a person, computing the age on `today`.
    pub fn from_person_on(person: Person, today: NaiveDate) -> Self {
        Self {
            age: person.age_on(today),
            country: person.country_name().map(str::to_string),
            person_id: person.person_id,
            person_name: person.person_name,
            email: person.email,
            date_of_birth: person.date_of_birth,
            gender: person.gender,
            country_id: person.country_id,
            address: person.address,
            receive_news_letters: person.receive_news_letters,
        }
    }

    /// Prefill for the edit form.
    pub fn to_person_update_request(&self) -> PersonUpdateRequest {
        PersonUpdateRequest {
            person_id: self.person_id,
            person_name: self.person_name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.as_deref().and_then(GenderOptions::parse),
            country_id: self.country_id,
            address: self.address.clone(),
            receive_news_letters: self.receive_news_letters,
            tax_identification_number: None,
        }
    }
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self::from_person_on(person, Utc::now().date_naive())
    }
}

/// Result of a country spreadsheet upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCountriesResponse {
    pub countries_inserted: usize,
}

/// Entry of the search field picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFieldOption {
    pub label: String,
    pub value: String,
}

impl SearchFieldOption {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Fields offered for searching, as `label -> searchBy value`.
pub fn search_field_options() -> Vec<SearchFieldOption> {
    vec![
        SearchFieldOption::new("Person Name", "PersonName"),
        SearchFieldOption::new("Email", "Email"),
        SearchFieldOption::new("Date of Birth", "DateOfBirth"),
        SearchFieldOption::new("Age", "Age"),
        SearchFieldOption::new("Address", "Address"),
        SearchFieldOption::new("Gender", "Gender"),
        SearchFieldOption::new("Country", "CountryID"),
    ]
}

/// Persons index: the filtered, sorted list plus the criteria that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonsIndexResponse {
    pub persons: Vec<PersonResponse>,
    pub search_fields: Vec<SearchFieldOption>,
    pub search_by: Option<String>,
    pub search_string: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: SortOrderOptions,
}

/// Data for the create form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonFormResponse {
    pub countries: Vec<CountryResponse>,
}

/// Data for the edit form: the prefilled request and the country choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonEditResponse {
    pub person: PersonUpdateRequest,
    pub countries: Vec<CountryResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_response_resolves_country_and_age() {
        let country = Country::new("Germany");
        let person = Person {
            person_id: Uuid::new_v4(),
            person_name: Some("Rahman".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 3, 1),
            country_id: Some(country.country_id),
            country: Some(country.clone()),
            ..Person::default()
        };

        let today = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let response = PersonResponse::from_person_on(person, today);

        assert_eq!(response.country.as_deref(), Some("Germany"));
        assert_eq!(response.age, Some(30));
    }

    #[test]
    fn test_update_request_parses_stored_gender() {
        let person = Person {
            person_id: Uuid::new_v4(),
            gender: Some("Female".into()),
            ..Person::default()
        };
        let request = PersonResponse::from(person).to_person_update_request();
        assert_eq!(request.gender, Some(GenderOptions::Female));
    }
}

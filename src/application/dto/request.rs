//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    Country, GenderOptions, Person, SortOrderOptions, DEFAULT_TAX_IDENTIFICATION_NUMBER,
};

/// Add country request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryAddRequest {
    pub country_name: Option<String>,
}

impl CountryAddRequest {
    /// Build a country with a fresh ID. The caller checks the name first.
    pub fn to_country(&self) -> Country {
        Country::new(self.country_name.clone().unwrap_or_default())
    }
}

/// Validated fields of the person requests, in declaration order.
pub const PERSON_REQUEST_FIELDS: &[&str] = &[
    "person_name",
    "email",
    "date_of_birth",
    "gender",
    "country_id",
    "address",
    "tax_identification_number",
];

/// Add person request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PersonAddRequest {
    #[validate(
        required(message = "Person name can't be empty."),
        length(min = 1, max = 40, message = "Person name must be 1-40 characters.")
    )]
    pub person_name: Option<String>,

    #[validate(
        required(message = "Email field can't be empty or null."),
        email(message = "Email address isn't valid."),
        length(max = 40, message = "Email must be at most 40 characters.")
    )]
    pub email: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(required(message = "Person gender can't be empty, choose one."))]
    pub gender: Option<GenderOptions>,

    pub country_id: Option<Uuid>,

    #[validate(length(max = 400, message = "Address must be at most 400 characters."))]
    pub address: Option<String>,

    #[serde(default)]
    pub receive_news_letters: bool,

    #[validate(length(equal = 8, message = "Tax identification number must be 8 characters."))]
    pub tax_identification_number: Option<String>,
}

impl PersonAddRequest {
    /// Convert into a person with a fresh ID.
    pub fn to_person(&self) -> Person {
        Person {
            person_id: Uuid::new_v4(),
            person_name: self.person_name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.map(|g| g.as_str().to_string()),
            country_id: self.country_id,
            address: self.address.clone(),
            receive_news_letters: self.receive_news_letters,
            tax_identification_number: Some(
                self.tax_identification_number
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TAX_IDENTIFICATION_NUMBER.to_string()),
            ),
            country: None,
        }
    }
}

/// Update person request. Every mutable field is overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonUpdateRequest {
    /// Taken from the route when omitted from the body
    #[serde(default)]
    pub person_id: Uuid,

    #[validate(
        required(message = "Person name can't be empty."),
        length(min = 1, max = 40, message = "Person name must be 1-40 characters.")
    )]
    pub person_name: Option<String>,

    #[validate(
        required(message = "Email field can't be empty or null."),
        email(message = "Email address isn't valid."),
        length(max = 40, message = "Email must be at most 40 characters.")
    )]
    pub email: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(required(message = "Person gender can't be empty, choose one."))]
    pub gender: Option<GenderOptions>,

    pub country_id: Option<Uuid>,

    #[validate(length(max = 400, message = "Address must be at most 400 characters."))]
    pub address: Option<String>,

    #[serde(default)]
    pub receive_news_letters: bool,

    /// Kept unchanged when absent
    #[validate(length(equal = 8, message = "Tax identification number must be 8 characters."))]
    pub tax_identification_number: Option<String>,
}

impl PersonUpdateRequest {
    /// Apply the request over the stored person.
    pub fn apply_to(&self, existing: &Person) -> Person {
        Person {
            person_id: existing.person_id,
            person_name: self.person_name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.map(|g| g.as_str().to_string()),
            country_id: self.country_id,
            address: self.address.clone(),
            receive_news_letters: self.receive_news_letters,
            tax_identification_number: self
                .tax_identification_number
                .clone()
                .or_else(|| existing.tax_identification_number.clone()),
            country: None,
        }
    }
}

/// Query string of the persons index (`?searchBy=PersonName&searchString=ma`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonsIndexQuery {
    pub search_by: Option<String>,
    pub search_string: Option<String>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrderOptions,
}

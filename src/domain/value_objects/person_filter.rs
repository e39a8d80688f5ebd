//! Person search filter.
//!
//! A typed predicate repositories receive for filtered reads. The in-memory
//! store evaluates [`PersonFilter::matches`]; the PostgreSQL store translates
//! the same rules to SQL.

use chrono::NaiveDate;

use crate::domain::entities::Person;

/// Date layout used when searching by date of birth (`2000 January 05`).
pub const SEARCH_DATE_FORMAT: &str = "%Y %B %d";

/// Fields a person search can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonSearchField {
    PersonName,
    Email,
    DateOfBirth,
    Age,
    Gender,
    /// Searches the joined country name
    CountryID,
    Address,
}

impl PersonSearchField {
    /// Parse a response field name. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PersonName" => Some(Self::PersonName),
            "Email" => Some(Self::Email),
            "DateOfBirth" => Some(Self::DateOfBirth),
            "Age" => Some(Self::Age),
            "Gender" => Some(Self::Gender),
            "CountryID" | "Country" => Some(Self::CountryID),
            "Address" => Some(Self::Address),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFilter {
    pub field: PersonSearchField,
    pub term: String,
}

impl PersonFilter {
    pub fn new(field: PersonSearchField, term: impl Into<String>) -> Self {
        Self {
            field,
            term: term.into(),
        }
    }

    /// Age the term names, for age searches. A non-numeric term matches nobody.
    pub fn age_term(&self) -> Option<i64> {
        self.term.trim().parse().ok()
    }

    /// Whether `person` satisfies the filter on `today`.
    ///
    /// Text fields match on a case-insensitive substring, gender on a
    /// case-insensitive equality, age on the exact number of years.
    pub fn matches(&self, person: &Person, today: NaiveDate) -> bool {
        match self.field {
            PersonSearchField::PersonName => self.contained_in(person.person_name.as_deref()),
            PersonSearchField::Email => self.contained_in(person.email.as_deref()),
            PersonSearchField::Address => self.contained_in(person.address.as_deref()),
            PersonSearchField::CountryID => self.contained_in(person.country_name()),
            PersonSearchField::DateOfBirth => {
                let formatted = person
                    .date_of_birth
                    .map(|dob| dob.format(SEARCH_DATE_FORMAT).to_string());
                self.contained_in(formatted.as_deref())
            }
            PersonSearchField::Gender => person
                .gender
                .as_deref()
                .is_some_and(|gender| gender.to_lowercase() == self.term.to_lowercase()),
            PersonSearchField::Age => match (self.age_term(), person.age_on(today)) {
                (Some(wanted), Some(age)) => wanted == age,
                _ => false,
            },
        }
    }

    fn contained_in(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| v.to_lowercase().contains(&self.term.to_lowercase()))
    }
}

//! Sort direction and sortable person fields.

use serde::{Deserialize, Serialize};

/// Sort direction, `ASC` / `DESC` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrderOptions {
    #[default]
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

/// Fields a person list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonSortField {
    PersonName,
    Email,
    Address,
    Country,
    Age,
    DateOfBirth,
    Gender,
    ReceiveNewsLetters,
}

impl PersonSortField {
    /// Parse a response field name. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PersonName" => Some(Self::PersonName),
            "Email" => Some(Self::Email),
            "Address" => Some(Self::Address),
            "Country" => Some(Self::Country),
            "Age" => Some(Self::Age),
            "DateOfBirth" => Some(Self::DateOfBirth),
            "Gender" => Some(Self::Gender),
            "ReceiveNewsLetters" => Some(Self::ReceiveNewsLetters),
            _ => None,
        }
    }
}

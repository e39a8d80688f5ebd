//! CSV export of persons.

use super::{text_or_empty, DocumentError};
use crate::application::dto::PersonResponse;

pub const CSV_HEADER: [&str; 8] = [
    "PersonName",
    "Email",
    "DateOfBirth",
    "Age",
    "Gender",
    "Country",
    "Address",
    "ReceiveNewsLetters",
];

/// Date layout of the `DateOfBirth` column.
const CSV_DATE_FORMAT: &str = "%Y/%m/%d";

/// Render persons as CSV with a fixed 8-column header.
pub fn persons_to_csv(persons: &[PersonResponse]) -> Result<Vec<u8>, DocumentError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for person in persons {
        let date_of_birth = person
            .date_of_birth
            .map(|dob| dob.format(CSV_DATE_FORMAT).to_string())
            .unwrap_or_else(|| " ".to_string());
        let age = person.age.map(|a| a.to_string()).unwrap_or_default();
        let news_letters = person.receive_news_letters.to_string();

        writer.write_record([
            text_or_empty(&person.person_name),
            text_or_empty(&person.email),
            date_of_birth.as_str(),
            age.as_str(),
            text_or_empty(&person.gender),
            text_or_empty(&person.country),
            text_or_empty(&person.address),
            news_letters.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| DocumentError::Io(e.into_error()))
}

//! XLSX export of persons and the country workbook reader.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use super::{text_or_empty, DocumentError};
use crate::application::dto::PersonResponse;

pub const PERSONS_SHEET: &str = "PersonsSheet";

pub const EXCEL_HEADER: [&str; 8] = [
    "Person Name",
    "Email",
    "Date Of Birth",
    "Age",
    "Gender",
    "Country",
    "Address",
    "Receive News Letters",
];

const EXCEL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render persons into a single-sheet workbook with autofit columns.
pub fn persons_to_xlsx(persons: &[PersonResponse]) -> Result<Vec<u8>, DocumentError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(PERSONS_SHEET)?;

    for (col, title) in EXCEL_HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (index, person) in persons.iter().enumerate() {
        let row = index as u32 + 1;

        worksheet.write_string(row, 0, text_or_empty(&person.person_name))?;
        worksheet.write_string(row, 1, text_or_empty(&person.email))?;
        if let Some(dob) = person.date_of_birth {
            worksheet.write_string(row, 2, dob.format(EXCEL_DATE_FORMAT).to_string())?;
        }
        if let Some(age) = person.age {
            worksheet.write_number(row, 3, age as f64)?;
        }
        worksheet.write_string(row, 4, text_or_empty(&person.gender))?;
        worksheet.write_string(row, 5, text_or_empty(&person.country))?;
        worksheet.write_string(row, 6, text_or_empty(&person.address))?;
        worksheet.write_boolean(row, 7, person.receive_news_letters)?;
    }

    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

/// Read country names from the first column of the first worksheet.
///
/// The first row is a header. Blank cells are skipped and names are trimmed.
pub fn read_country_names(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DocumentError::Spreadsheet("Workbook has no worksheets".into()))?
        .map_err(|e| DocumentError::Spreadsheet(e.to_string()))?;

    Ok(range
        .rows()
        .skip(1)
        .filter_map(|row| row.first())
        .filter_map(cell_text)
        .collect())
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

//! Document Rendering
//!
//! Person exports (CSV, XLSX, PDF) and the country workbook reader used by
//! the spreadsheet upload. Every renderer takes already projected
//! [`PersonResponse`](crate::application::dto::PersonResponse) rows so the
//! column values match what the API returns.

pub mod csv;
pub mod excel;
pub mod pdf;

/// Document rendering errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Spreadsheet write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Spreadsheet read error: {0}")]
    Spreadsheet(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text cell value, empty when absent.
pub(crate) fn text_or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

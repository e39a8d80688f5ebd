//! Country Handlers

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::dto::{CountryAddRequest, CountryResponse, UploadCountriesResponse};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List all countries
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CountryResponse>>, AppError> {
    Ok(Json(state.countries.get_all_countries().await?))
}

/// Add a country
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<CountryAddRequest>>,
) -> Result<(StatusCode, Json<CountryResponse>), AppError> {
    let country = state.countries.add_country(body.map(|Json(b)| b)).await?;
    metrics::record_mutation("country", "add");

    Ok((StatusCode::CREATED, Json(country)))
}

/// Get a country by ID
pub async fn get(
    State(state): State<AppState>,
    Path(country_id): Path<Uuid>,
) -> Result<Json<CountryResponse>, AppError> {
    state
        .countries
        .get_country_by_country_id(Some(country_id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Country with id {} not found", country_id)))
}

/// Import country names from an uploaded `.xlsx` workbook
pub async fn upload_from_excel_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadCountriesResponse>, AppError> {
    let mut workbook = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let is_xlsx = field
            .file_name()
            .is_some_and(|name| name.to_ascii_lowercase().ends_with(".xlsx"));
        if !is_xlsx {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        workbook = Some(bytes);
        break;
    }

    let workbook = workbook
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("Please select an xlsx file".into()))?;

    let countries_inserted = state
        .countries
        .upload_countries_from_excel_file(&workbook)
        .await?;
    if countries_inserted > 0 {
        metrics::record_mutation("country", "upload");
    }

    Ok(Json(UploadCountriesResponse { countries_inserted }))
}

//! Person Handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::application::dto::{
    search_field_options, PersonAddRequest, PersonEditResponse, PersonFormResponse,
    PersonResponse, PersonUpdateRequest, PersonsIndexQuery, PersonsIndexResponse,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::startup::AppState;

const CSV_CONTENT_TYPE: &str = "application/octet-stream";
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const PDF_CONTENT_TYPE: &str = "application/pdf";

/// List persons, filtered then sorted by the query string
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PersonsIndexQuery>,
) -> Result<Json<PersonsIndexResponse>, AppError> {
    tracing::debug!(
        search_by = ?query.search_by,
        search_string = ?query.search_string,
        sort_by = ?query.sort_by,
        sort_order = ?query.sort_order,
        "Listing persons"
    );

    let persons = state
        .persons
        .get_filtered_persons(query.search_by.as_deref(), query.search_string.as_deref())
        .await?;
    let persons = state
        .persons
        .get_sorted_persons(persons, query.sort_by.as_deref(), query.sort_order);

    Ok(Json(PersonsIndexResponse {
        persons,
        search_fields: search_field_options(),
        search_by: query.search_by,
        search_string: query.search_string,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    }))
}

/// Country choices for the create form
pub async fn create_form(
    State(state): State<AppState>,
) -> Result<Json<PersonFormResponse>, AppError> {
    let countries = state.countries.get_all_countries().await?;
    Ok(Json(PersonFormResponse { countries }))
}

/// Add a person
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<PersonAddRequest>>,
) -> Result<(StatusCode, Json<PersonResponse>), AppError> {
    let person = state.persons.add_person(body.map(|Json(b)| b)).await?;
    metrics::record_mutation("person", "add");

    Ok((StatusCode::CREATED, Json(person)))
}

/// Prefilled update request for the edit form
pub async fn edit_form(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
) -> Result<Json<PersonEditResponse>, AppError> {
    let person = find_person(&state, person_id).await?;
    let countries = state.countries.get_all_countries().await?;

    Ok(Json(PersonEditResponse {
        person: person.to_person_update_request(),
        countries,
    }))
}

/// Update a person. The route ID wins over any ID in the body.
pub async fn edit(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
    body: Option<Json<PersonUpdateRequest>>,
) -> Result<Json<PersonResponse>, AppError> {
    find_person(&state, person_id).await?;

    let request = body.map(|Json(mut b)| {
        b.person_id = person_id;
        b
    });
    let person = state.persons.update_person(request).await?;
    metrics::record_mutation("person", "update");

    Ok(Json(person))
}

/// Person to confirm before deleting
pub async fn delete_form(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
) -> Result<Json<PersonResponse>, AppError> {
    Ok(Json(find_person(&state, person_id).await?))
}

/// Delete a person
pub async fn delete(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.persons.delete_person(Some(person_id)).await? {
        return Err(AppError::NotFound(format!("Person with id {} not found", person_id)));
    }
    metrics::record_mutation("person", "delete");

    Ok(StatusCode::NO_CONTENT)
}

/// All persons as a PDF download
pub async fn persons_pdf(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bytes = state.persons.get_persons_pdf().await?;
    metrics::record_export("pdf");
    Ok(attachment(PDF_CONTENT_TYPE, "Persons.pdf", bytes))
}

/// All persons as a CSV download
pub async fn persons_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bytes = state.persons.get_persons_csv().await?;
    metrics::record_export("csv");
    Ok(attachment(CSV_CONTENT_TYPE, "Persons.csv", bytes))
}

/// All persons as an XLSX download
pub async fn persons_excel(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bytes = state.persons.get_persons_excel().await?;
    metrics::record_export("xlsx");
    Ok(attachment(XLSX_CONTENT_TYPE, "Persons.xlsx", bytes))
}

async fn find_person(state: &AppState, person_id: Uuid) -> Result<PersonResponse, AppError> {
    state
        .persons
        .get_person_by_person_id(Some(person_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", person_id)))
}

fn attachment(content_type: &'static str, file_name: &str, bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
}

//! Country API Tests

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use serde_json::{json, Value};
use uuid::Uuid;

use person_registry::application::dto::{CountryResponse, UploadCountriesResponse};

use crate::common::TestApp;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn country_workbook(names: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "CountryName").unwrap();
    for (i, name) in names.iter().enumerate() {
        sheet.write_string(i as u32 + 1, 0, *name).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

fn upload_form(file_name: &str, bytes: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes).file_name(file_name).mime_type(XLSX_MIME);
    MultipartForm::new().add_part("formFile", part)
}

#[tokio::test]
async fn test_add_country_appears_in_list() {
    let app = TestApp::new();

    let added = app.add_country("Japan").await;
    let countries: Vec<CountryResponse> = app.server.get("/countries").await.json();

    assert_eq!(countries, vec![added]);
}

#[tokio::test]
async fn test_add_country_rejects_duplicate() {
    let app = TestApp::new();
    app.add_country("Japan").await;

    let response = app
        .server
        .post("/countries")
        .json(&json!({ "country_name": "Japan" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 10002);
}

#[tokio::test]
async fn test_add_country_rejects_empty_name_and_missing_body() {
    let app = TestApp::new();

    app.server
        .post("/countries")
        .json(&json!({ "country_name": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .post("/countries")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_country_rejects_name_over_limit() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/countries")
        .json(&json!({ "country_name": "N".repeat(101) }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let countries: Vec<CountryResponse> = app.server.get("/countries").await.json();
    assert!(countries.is_empty());
}

#[tokio::test]
async fn test_countries_are_listed_by_name() {
    let app = TestApp::new();
    for name in ["Peru", "Chile", "Iran"] {
        app.add_country(name).await;
    }

    let countries: Vec<CountryResponse> = app.server.get("/countries").await.json();
    let names: Vec<&str> = countries.iter().map(|c| c.country_name.as_str()).collect();
    assert_eq!(names, vec!["Chile", "Iran", "Peru"]);
}

#[tokio::test]
async fn test_get_country_by_id() {
    let app = TestApp::new();
    let added = app.add_country("Peru").await;

    let found: CountryResponse = app
        .server
        .get(&format!("/countries/{}", added.country_id))
        .await
        .json();
    assert_eq!(found, added);

    app.server
        .get(&format!("/countries/{}", Uuid::new_v4()))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_upload_inserts_only_new_countries() {
    let app = TestApp::new();
    app.add_country("Iran").await;

    let form = upload_form("countries.xlsx", country_workbook(&["Iran", "Chile", "Chile", "Ghana"]));
    let response = app
        .server
        .post("/countries/upload-from-excel-file")
        .multipart(form)
        .await;

    response.assert_status_ok();
    let result: UploadCountriesResponse = response.json();
    assert_eq!(result.countries_inserted, 2);

    let countries: Vec<CountryResponse> = app.server.get("/countries").await.json();
    assert_eq!(countries.len(), 3);
}

#[tokio::test]
async fn test_upload_requires_xlsx_file() {
    let app = TestApp::new();

    let form = upload_form("countries.csv", b"Iran\nChile".to_vec());
    app.server
        .post("/countries/upload-from-excel-file")
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

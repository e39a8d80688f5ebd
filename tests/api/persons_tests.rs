//! Person API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use person_registry::application::dto::{
    PersonEditResponse, PersonFormResponse, PersonResponse, PersonsIndexResponse,
};

use crate::common::{person_body, random_person_body, TestApp};

fn names(index: &PersonsIndexResponse) -> Vec<&str> {
    index
        .persons
        .iter()
        .filter_map(|p| p.person_name.as_deref())
        .collect()
}

async fn index(app: &TestApp, query: &[(&str, &str)]) -> PersonsIndexResponse {
    let mut request = app.server.get("/persons/index");
    for (key, value) in query {
        request = request.add_query_param(key, value);
    }
    let response = request.await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_create_person_appears_in_index() {
    let app = TestApp::new();
    let iran = app.add_country("Iran").await;

    let added = app.add_person(&person_body("Mahdi", Some(iran.country_id))).await;

    assert_eq!(added.country.as_deref(), Some("Iran"));
    assert!(added.age.is_some());

    let listed = index(&app, &[]).await;
    assert_eq!(listed.persons, vec![added.clone()]);

    let root: PersonsIndexResponse = app.server.get("/").await.json();
    assert_eq!(root.persons, vec![added]);
}

#[tokio::test]
async fn test_create_form_lists_countries() {
    let app = TestApp::new();
    app.add_country("Iran").await;
    app.add_country("Chile").await;

    let form: PersonFormResponse = app.server.get("/persons/create").await.json();
    assert_eq!(form.countries.len(), 2);
}

#[tokio::test]
async fn test_create_person_validation_errors() {
    let app = TestApp::new();

    let mut missing_name = random_person_body();
    missing_name["person_name"] = Value::Null;
    let response = app.server.post("/persons/create").json(&missing_name).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 10007);
    assert_eq!(body["errors"][0]["field"], "person_name");

    let mut bad_email = random_person_body();
    bad_email["email"] = json!("not-an-email");
    app.server
        .post("/persons/create")
        .json(&bad_email)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut missing_gender = random_person_body();
    missing_gender["gender"] = Value::Null;
    app.server
        .post("/persons/create")
        .json(&missing_gender)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_person_reports_fields_in_form_order() {
    let app = TestApp::new();

    let mut body = random_person_body();
    body["person_name"] = Value::Null;
    body["email"] = json!("not-an-email");
    let response = app.server.post("/persons/create").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "person_name: Person name can't be empty.");
    assert_eq!(body["errors"][0]["field"], "person_name");
    assert_eq!(body["errors"][1]["field"], "email");
}

#[tokio::test]
async fn test_create_person_with_unknown_country_fails() {
    let app = TestApp::new();

    app.server
        .post("/persons/create")
        .json(&person_body("Ali", Some(Uuid::new_v4())))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_filters_by_name() {
    let app = TestApp::new();
    for name in ["Mahdi", "Rahman", "Ali"] {
        app.add_person(&person_body(name, None)).await;
    }

    let found = index(&app, &[("searchBy", "PersonName"), ("searchString", "ma")]).await;

    assert_eq!(names(&found), vec!["Mahdi", "Rahman"]);
    assert_eq!(found.search_by.as_deref(), Some("PersonName"));
    assert!(!found.search_fields.is_empty());
}

#[tokio::test]
async fn test_index_filters_by_country_name() {
    let app = TestApp::new();
    let iran = app.add_country("Iran").await;
    let chile = app.add_country("Chile").await;
    app.add_person(&person_body("Mahdi", Some(iran.country_id))).await;
    app.add_person(&person_body("Sofia", Some(chile.country_id))).await;
    app.add_person(&person_body("Nobody", None)).await;

    let found = index(&app, &[("searchBy", "CountryID"), ("searchString", "IR")]).await;

    assert_eq!(names(&found), vec!["Mahdi"]);
}

#[tokio::test]
async fn test_index_sorts_descending() {
    let app = TestApp::new();
    for name in ["mahdi", "Ali", "rahman"] {
        app.add_person(&person_body(name, None)).await;
    }

    let sorted = index(&app, &[("sortBy", "PersonName"), ("sortOrder", "DESC")]).await;

    assert_eq!(names(&sorted), vec!["rahman", "mahdi", "Ali"]);
}

#[tokio::test]
async fn test_edit_form_prefills_request() {
    let app = TestApp::new();
    let added = app.add_person(&person_body("Mahdi", None)).await;

    let form: PersonEditResponse = app
        .server
        .get(&format!("/persons/edit/{}", added.person_id))
        .await
        .json();

    assert_eq!(form.person.person_id, added.person_id);
    assert_eq!(form.person.person_name.as_deref(), Some("Mahdi"));

    app.server
        .get(&format!("/persons/edit/{}", Uuid::new_v4()))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_edit_person_updates_fields() {
    let app = TestApp::new();
    let added = app.add_person(&person_body("Mahdi", None)).await;

    let mut body = person_body("Ali", None);
    body["gender"] = json!("Other");
    body["receive_news_letters"] = json!(false);

    let response = app
        .server
        .post(&format!("/persons/edit/{}", added.person_id))
        .json(&body)
        .await;
    response.assert_status_ok();
    let updated: PersonResponse = response.json();

    let fetched: PersonResponse = app
        .server
        .get(&format!("/persons/delete/{}", added.person_id))
        .await
        .json();

    assert_eq!(updated, fetched);
    assert_eq!(fetched.person_name.as_deref(), Some("Ali"));
    assert_eq!(fetched.gender.as_deref(), Some("Other"));
    assert!(!fetched.receive_news_letters);
}

#[tokio::test]
async fn test_edit_person_rejects_unknown_id_and_null_name() {
    let app = TestApp::new();

    app.server
        .post(&format!("/persons/edit/{}", Uuid::new_v4()))
        .json(&random_person_body())
        .await
        .assert_status_not_found();

    let added = app.add_person(&random_person_body()).await;
    let mut body = random_person_body();
    body["person_name"] = Value::Null;
    app.server
        .post(&format!("/persons/edit/{}", added.person_id))
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_person() {
    let app = TestApp::new();
    let added = app.add_person(&random_person_body()).await;

    app.server
        .post(&format!("/persons/delete/{}", Uuid::new_v4()))
        .await
        .assert_status_not_found();

    app.server
        .post(&format!("/persons/delete/{}", added.person_id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/persons/delete/{}", added.person_id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_csv_export() {
    let app = TestApp::new();
    app.add_person(&person_body("Mahdi", None)).await;

    let response = app.server.get("/persons/persons-csv").await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"Persons.csv\""
    );
    let text = response.text();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("PersonName,Email,DateOfBirth,Age,Gender,Country,Address,ReceiveNewsLetters")
    );
    assert!(lines.next().is_some_and(|row| row.starts_with("Mahdi,")));
}

#[tokio::test]
async fn test_excel_and_pdf_exports() {
    let app = TestApp::new();
    app.add_person(&random_person_body()).await;

    let excel = app.server.get("/persons/persons-excel").await;
    excel.assert_status_ok();
    assert_eq!(
        excel.header("content-type"),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    // XLSX is a zip archive
    assert!(excel.as_bytes().starts_with(b"PK"));

    let pdf = app.server.get("/persons/persons-pdf").await;
    pdf.assert_status_ok();
    assert_eq!(pdf.header("content-type"), "application/pdf");
    assert!(pdf.as_bytes().starts_with(b"%PDF"));
}

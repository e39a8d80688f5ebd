//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use axum::http::StatusCode;
use axum_test::TestServer;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::FirstName;
use fake::Fake;
use serde_json::{json, Value};
use uuid::Uuid;

use person_registry::application::dto::{CountryResponse, PersonResponse};
use person_registry::config::{
    CorsSettings, DatabaseSettings, ServerSettings, Settings, StorageBackend, StorageSettings,
};
use person_registry::startup::{build_router, AppState};

/// Test application over the in-memory backend
pub struct TestApp {
    pub server: TestServer,
}

impl TestApp {
    /// Fresh application with empty stores
    pub fn new() -> Self {
        let router = build_router(AppState::in_memory(test_settings()));
        let server = TestServer::new(router).expect("Failed to start test server");
        Self { server }
    }

    /// Add a country through the API
    pub async fn add_country(&self, country_name: &str) -> CountryResponse {
        let response = self
            .server
            .post("/countries")
            .json(&json!({ "country_name": country_name }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    /// Add a person through the API
    pub async fn add_person(&self, body: &Value) -> PersonResponse {
        let response = self.server.post("/persons/create").json(body).await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }
}

/// Settings for the in-memory backend
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
            max_upload_bytes: 1024 * 1024,
        },
        database: DatabaseSettings {
            url: None,
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
            run_migrations: false,
        },
        storage: StorageSettings {
            backend: StorageBackend::Memory,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        environment: "test".into(),
    }
}

/// Valid create-person body with a fake email
pub fn person_body(person_name: &str, country_id: Option<Uuid>) -> Value {
    let email: String = SafeEmail().fake();
    json!({
        "person_name": person_name,
        "email": email,
        "date_of_birth": "1994-01-05",
        "gender": "Male",
        "country_id": country_id,
        "address": "12 Main Street",
        "receive_news_letters": true,
    })
}

/// Valid create-person body with a fake name
pub fn random_person_body() -> Value {
    let name: String = FirstName().fake();
    person_body(&name, None)
}

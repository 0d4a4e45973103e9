//! REST API test harness.

use axum_test::{TestResponse, TestServer};
use roster_persistence::backends::sqlite::SqliteBackend;
use roster_rest::{ServerConfig, create_app_with_config};
use serde_json::{Value, json};

/// Id of the company seeded into every harness.
pub const ACME_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f7";

/// An id that no document has.
pub const MISSING_ID: &str = "000000000000000000000000";

/// Test harness for REST API testing.
///
/// # Example
///
/// ```rust,ignore
/// let harness = RestTestHarness::new().await;
/// let id = harness.create_person("Alice").await;
/// harness.get(&format!("/api/person/read/{id}")).await.assert_status_ok();
/// ```
pub struct RestTestHarness {
    /// The test server instance.
    pub server: TestServer,
}

impl RestTestHarness {
    /// Creates a harness with the testing configuration.
    pub async fn new() -> Self {
        Self::with_config(ServerConfig::for_testing()).await
    }

    /// Creates a harness with a custom configuration.
    pub async fn with_config(config: ServerConfig) -> Self {
        let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
        backend.init_schema().expect("Failed to init schema");
        backend
            .insert_company(json!({"_id": ACME_ID, "name": "Acme", "city": "Springfield"}))
            .await
            .expect("Failed to seed company");

        let app = create_app_with_config(backend, config);
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server }
    }

    /// Issues a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.server.get(path).await
    }

    /// Creates a person through the API and returns its id.
    pub async fn create_person(&self, name: &str) -> String {
        self.create(json!({"name": name, "companyId": ACME_ID})).await
    }

    /// Creates a document through the API and returns its id.
    pub async fn create(&self, body: Value) -> String {
        let response = self.server.post("/api/person/create").json(&body).await;
        response.assert_status_ok();

        let body: Value = response.json();
        body["result"]["_id"]
            .as_str()
            .expect("created document has an _id")
            .to_string()
    }
}

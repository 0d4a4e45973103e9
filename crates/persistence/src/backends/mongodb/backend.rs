//! MongoDB backend implementation.

use std::fmt::Debug;

use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, Database, IndexModel};
use serde_json::Value;

use crate::error::{BackendError, StorageError, StorageResult, ValidationError};
use crate::types::document::ID_FIELD;
use crate::types::{Company, DocumentId};

use super::convert::company_to_document;

/// Name of the person collection.
pub const PERSONS_COLLECTION: &str = "persons";

/// Name of the company collection.
pub const COMPANIES_COLLECTION: &str = "companies";

/// MongoDB backend for person and company documents.
#[derive(Clone)]
pub struct MongoBackend {
    client: Client,
    database: Database,
}

impl Debug for MongoBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoBackend")
            .field("database", &self.database.name())
            .finish_non_exhaustive()
    }
}

pub(crate) fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "mongodb".to_string(),
        message,
        source: None,
    })
}

pub(crate) fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

impl MongoBackend {
    /// Connects to a MongoDB deployment and selects a database.
    pub async fn connect(uri: &str, database: &str) -> StorageResult<Self> {
        let client = Client::with_uri_str(uri).await.map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "mongodb".to_string(),
                message: e.to_string(),
            })
        })?;
        let database = client.database(database);

        tracing::info!(database = %database.name(), "Connected to MongoDB");

        Ok(Self { client, database })
    }

    /// Creates the indexes used by list ordering and search sorting.
    pub async fn init_schema(&self) -> StorageResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "created": -1, "_id": -1 }).build(),
            IndexModel::builder().keys(doc! { "name": 1, "_id": 1 }).build(),
        ];
        self.persons()
            .create_indexes(indexes)
            .await
            .map_err(|e| StorageError::Backend(BackendError::MigrationError {
                message: format!("Failed to create person indexes: {}", e),
            }))?;
        Ok(())
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn persons(&self) -> Collection<Document> {
        self.database.collection(PERSONS_COLLECTION)
    }

    pub(crate) fn companies(&self) -> Collection<Document> {
        self.database.collection(COMPANIES_COLLECTION)
    }

    /// Inserts a company document.
    ///
    /// Companies are owned by another service; this exists for seeding. A
    /// valid `_id` in the body is kept, otherwise one is generated.
    pub async fn insert_company(&self, body: Value) -> StorageResult<Company> {
        let Value::Object(fields) = body else {
            return Err(ValidationError::InvalidDocument {
                message: "company must be a JSON object".to_string(),
            }
            .into());
        };

        let id = fields
            .get(ID_FIELD)
            .and_then(|v| v.as_str())
            .map(DocumentId::parse)
            .transpose()?
            .unwrap_or_else(DocumentId::generate);
        let company = Company::new(id, fields);

        self.companies()
            .insert_one(company_to_document(&company)?)
            .await
            .map_err(|e| internal_error(format!("Failed to insert company: {}", e)))?;

        Ok(company)
    }
}

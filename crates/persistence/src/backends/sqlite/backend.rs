//! SQLite backend implementation.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BackendError, StorageError, StorageResult, ValidationError};
use crate::types::document::ID_FIELD;
use crate::types::{Company, DocumentId};

use super::{functions, schema};

/// SQLite backend for person and company documents.
pub struct SqliteBackend {
    pool: Pool<SqliteConnectionManager>,
    config: SqliteBackendConfig,
    is_memory: bool,
}

impl Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .finish_non_exhaustive()
    }
}

/// Configuration for the SQLite backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteBackendConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable WAL mode for better concurrency.
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteBackendConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
        }
    }
}

pub(crate) fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

pub(crate) fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

impl SqliteBackend {
    /// Creates a new in-memory SQLite backend.
    ///
    /// An in-memory database lives inside a single connection, so the pool is
    /// pinned to exactly one connection that is never recycled.
    pub fn in_memory() -> StorageResult<Self> {
        Self::with_config(":memory:", SqliteBackendConfig::default())
    }

    /// Opens or creates a file-based SQLite database.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_config(path, SqliteBackendConfig::default())
    }

    /// Creates a backend with custom configuration.
    pub fn with_config<P: AsRef<Path>>(path: P, config: SqliteBackendConfig) -> StorageResult<Self> {
        let path_str = path.as_ref().to_string_lossy();
        let is_memory = path_str == ":memory:";

        let busy_timeout = Duration::from_millis(config.busy_timeout_ms as u64);
        let manager = if is_memory {
            SqliteConnectionManager::memory()
        } else {
            SqliteConnectionManager::file(path.as_ref())
        }
        .with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            functions::register(conn)
        });

        let mut builder = Pool::builder()
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms));
        builder = if is_memory {
            builder
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            builder
                .max_size(config.max_connections)
                .min_idle(Some(config.min_connections))
        };

        let pool = builder.build(manager).map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "sqlite".to_string(),
                message: e.to_string(),
            })
        })?;

        let backend = Self {
            pool,
            config,
            is_memory,
        };

        backend.configure_connection()?;

        tracing::info!(path = %path_str, in_memory = is_memory, "Opened SQLite database");

        Ok(backend)
    }

    /// Initialize the database schema.
    pub fn init_schema(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        schema::initialize_schema(&conn)
    }

    /// Get a connection from the pool.
    pub(crate) fn get_connection(&self) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "sqlite".to_string(),
                message: e.to_string(),
            })
        })
    }

    /// Configure database-wide settings.
    fn configure_connection(&self) -> StorageResult<()> {
        if self.config.enable_wal && !self.is_memory {
            let conn = self.get_connection()?;
            // journal_mode returns the resulting mode as a row
            conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
                .map_err(|e| internal_error(format!("Failed to enable WAL mode: {}", e)))?;
        }

        Ok(())
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &SqliteBackendConfig {
        &self.config
    }

    /// Inserts a company document.
    ///
    /// Companies are owned by another service; this exists for seeding and
    /// tests. A valid `_id` in the body is kept, otherwise one is generated.
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

        let data = serde_json::to_string(&company)
            .map_err(|e| serialization_error(format!("Failed to serialize company: {}", e)))?;

        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO companies (id, data) VALUES (?1, ?2)",
            params![company.id().to_hex(), data],
        )
        .map_err(|e| internal_error(format!("Failed to insert company: {}", e)))?;

        Ok(company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_memory_backend() {
        let backend = SqliteBackend::in_memory().unwrap();
        assert!(backend.is_memory());
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();
        backend.init_schema().unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = SqliteBackendConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.busy_timeout_ms, 5000);
        assert!(config.enable_wal);
    }

    #[tokio::test]
    async fn test_insert_company_keeps_id() {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();

        let company = backend
            .insert_company(json!({"_id": "65A1F0C2E4B0A1B2C3D4E5F7", "name": "Acme"}))
            .await
            .unwrap();
        assert_eq!(company.id().to_string(), "65a1f0c2e4b0a1b2c3d4e5f7");
        assert_eq!(company.fields()["name"], "Acme");
    }

    #[tokio::test]
    async fn test_insert_company_rejects_bad_id() {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();

        let result = backend.insert_company(json!({"_id": "nope"})).await;
        assert!(matches!(result, Err(StorageError::Identifier(_))));
    }

    #[test]
    fn test_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SqliteBackend::open(dir.path().join("roster.db")).unwrap();
        assert!(!backend.is_memory());
        backend.init_schema().unwrap();
    }
}

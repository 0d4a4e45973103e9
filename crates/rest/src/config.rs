//! Server configuration for the person API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ROSTER_SERVER_PORT` | 8080 | Server port |
//! | `ROSTER_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `ROSTER_LOG_LEVEL` | info | Log level |
//! | `ROSTER_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `ROSTER_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ROSTER_ENABLE_CORS` | true | Enable CORS |
//! | `ROSTER_CORS_ORIGINS` | * | Allowed origins |
//! | `ROSTER_CORS_METHODS` | GET,POST,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `ROSTER_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `ROSTER_STORAGE_BACKEND` | sqlite | Storage backend (sqlite, mongodb) |
//! | `ROSTER_DATABASE_URL` | | SQLite path or MongoDB URI |
//! | `ROSTER_DATABASE_NAME` | roster | MongoDB database name |
//! | `ROSTER_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `ROSTER_DEFAULT_PAGE_SIZE` | 10 | Default list page size |
//! | `ROSTER_MAX_PAGE_SIZE` | 100 | Maximum list page size |
//! | `ROSTER_SEARCH_LIMIT` | 10 | Maximum search results |
//!
//! # Example
//!
//! ```rust
//! use roster_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use clap::Parser;

/// The storage backend to serve from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Embedded SQLite database.
    #[default]
    Sqlite,
    /// MongoDB deployment.
    MongoDb,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::MongoDb => write!(f, "mongodb"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb),
            other => Err(format!(
                "unknown storage backend '{}' (expected sqlite or mongodb)",
                other
            )),
        }
    }
}

/// Server configuration for the person API.
///
/// This struct is parsed from command line arguments and `ROSTER_*`
/// environment variables using [`ServerConfig::parse`], or built
/// programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "roster")]
#[command(about = "Person resource service")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ROSTER_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ROSTER_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ROSTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "ROSTER_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "ROSTER_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "ROSTER_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ROSTER_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "ROSTER_CORS_METHODS",
        default_value = "GET,POST,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "ROSTER_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Storage backend (sqlite, mongodb).
    #[arg(long, env = "ROSTER_STORAGE_BACKEND", default_value = "sqlite")]
    pub storage_backend: StorageBackend,

    /// Database connection string: a SQLite path or a MongoDB URI.
    #[arg(long, env = "ROSTER_DATABASE_URL")]
    pub database_url: Option<String>,

    /// MongoDB database name.
    #[arg(long, env = "ROSTER_DATABASE_NAME", default_value = "roster")]
    pub database_name: String,

    /// Enable request ID tracking.
    #[arg(long, env = "ROSTER_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,

    /// Default page size for list results.
    #[arg(long, env = "ROSTER_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: u64,

    /// Maximum page size for list results.
    #[arg(long, env = "ROSTER_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: u64,

    /// Maximum number of search results.
    #[arg(long, env = "ROSTER_SEARCH_LIMIT", default_value = "10")]
    pub search_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            storage_backend: StorageBackend::Sqlite,
            database_url: None,
            database_name: "roster".to_string(),
            enable_request_id: true,
            default_page_size: 10,
            max_page_size: 100,
            search_limit: 10,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.max_page_size == 0 {
            errors.push("Max page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if self.search_limit == 0 {
            errors.push("Search limit cannot be 0".to_string());
        }

        if self.database_name.trim().is_empty() {
            errors.push("Database name cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            database_url: Some(":memory:".to_string()),
            enable_request_id: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.enable_cors);
        assert_eq!(config.storage_backend, StorageBackend::Sqlite);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.search_limit, 10);
    }

    #[test]
    fn test_parse_matches_default() {
        let config = ServerConfig::try_parse_from(["roster"]).unwrap();
        let default = ServerConfig::default();
        assert_eq!(config.max_body_size, default.max_body_size);
        assert_eq!(config.cors_methods, default.cors_methods);
        assert_eq!(config.database_name, default.database_name);
    }

    #[test]
    fn test_parse_flags() {
        let config = ServerConfig::try_parse_from([
            "roster",
            "--port",
            "3000",
            "--storage-backend",
            "mongodb",
            "--database-url",
            "mongodb://localhost:27017",
            "--max-page-size",
            "50",
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage_backend, StorageBackend::MongoDb);
        assert_eq!(
            config.database_url.as_deref(),
            Some("mongodb://localhost:27017")
        );
        assert_eq!(config.max_page_size, 50);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(
            ServerConfig::try_parse_from(["roster", "--storage-backend", "postgres"]).is_err()
        );
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_invalid_page_sizes() {
        let config = ServerConfig {
            default_page_size: 200,
            max_page_size: 100,
            search_limit: 0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("exceed")));
        assert!(errors.iter().any(|e| e.contains("Search limit")));
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert!(!config.enable_request_id);
        assert_eq!(config.database_url.as_deref(), Some(":memory:"));
    }
}

//! Roster Persistence Layer
//!
//! This crate stores person documents and resolves their company references.
//! Every backend implements the [`PersonStorage`](core::PersonStorage) trait,
//! so the HTTP layer never knows which store it is talking to.
//!
//! # Backend Features
//!
//! ```toml
//! [dependencies]
//! roster-persistence = { version = "0.1", features = ["mongodb"] }
//! ```
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `mongodb` - MongoDB document storage
//!
//! # Architecture
//!
//! - [`types`] - Documents, identifiers, pagination, and search queries
//! - [`schema`] - Validation of person documents
//! - [`error`] - Error types for all operations
//! - [`core`] - The storage trait
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use roster_persistence::backends::sqlite::SqliteBackend;
//! use roster_persistence::core::PersonStorage;
//! use roster_persistence::types::PageRequest;
//! use serde_json::json;
//!
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let person = backend
//!     .create_person(json!({"name": "Alice", "companyId": "65a1f0c2e4b0a1b2c3d4e5f7"}))
//!     .await?;
//!
//! let page = backend.list_persons(&PageRequest::new(1, 10)).await?;
//! assert_eq!(page[0].id(), person.id());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod schema;
pub mod types;

// Re-export commonly used types at crate root
pub use core::PersonStorage;
pub use error::{StorageError, StorageResult};
pub use schema::PersonSchema;
pub use types::{Company, DocumentId, PageInfo, PageRequest, Person, PersonWithCompany, SearchQuery};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! SQLite backend implementation.
//!
//! Supports in-memory databases (used by the test suites) and file-based
//! databases for development and small deployments.
//!
//! # Example
//!
//! ```no_run
//! use roster_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::open("./data/roster.db")?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE persons (
//!     seq INTEGER PRIMARY KEY AUTOINCREMENT,
//!     id TEXT NOT NULL UNIQUE,       -- 24-char lowercase hex
//!     company_id TEXT NOT NULL,
//!     name TEXT NOT NULL,
//!     created TEXT NOT NULL,         -- RFC 3339, millisecond precision
//!     data TEXT NOT NULL             -- full JSON document
//! );
//!
//! CREATE TABLE companies (
//!     id TEXT PRIMARY KEY,
//!     data TEXT NOT NULL
//! );
//! ```

mod backend;
mod functions;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};

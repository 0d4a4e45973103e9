//! Core storage traits.
//!
//! - [`PersonStorage`] - CRUD, list, and search over the person collection
//!
//! # Example: Implementing a Storage Backend
//!
//! ```ignore
//! use async_trait::async_trait;
//! use roster_persistence::core::PersonStorage;
//! use roster_persistence::error::StorageResult;
//! use roster_persistence::types::Person;
//!
//! struct MyBackend {
//!     // ... backend-specific fields
//! }
//!
//! #[async_trait]
//! impl PersonStorage for MyBackend {
//!     fn backend_name(&self) -> &'static str {
//!         "my-backend"
//!     }
//!
//!     async fn create_person(&self, body: serde_json::Value) -> StorageResult<Person> {
//!         let person = roster_persistence::schema::PersonSchema.prepare_new(body)?;
//!         // Implementation...
//!         todo!()
//!     }
//!
//!     // ... implement other required methods
//! }
//! ```

pub mod storage;

pub use storage::PersonStorage;

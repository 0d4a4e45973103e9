//! Core person storage trait.
//!
//! This module defines the [`PersonStorage`] trait, the single seam between
//! the HTTP layer and a document store.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageResult;
use crate::types::{PageRequest, Person, PersonWithCompany, SearchQuery};

/// Storage operations for the person collection.
///
/// Implementations validate writes with [`PersonSchema`](crate::schema::PersonSchema)
/// and report schema failures as `StorageError::Validation`. Identifiers are
/// passed through as raw strings; a malformed one is reported as
/// `StorageError::Identifier`.
///
/// # Example
///
/// ```ignore
/// use roster_persistence::core::PersonStorage;
/// use roster_persistence::types::PageRequest;
///
/// async fn example<S: PersonStorage>(storage: &S) -> roster_persistence::StorageResult<()> {
///     let created = storage
///         .create_person(serde_json::json!({
///             "name": "Alice",
///             "companyId": "65a1f0c2e4b0a1b2c3d4e5f7"
///         }))
///         .await?;
///
///     let found = storage
///         .read_person_with_company(&created.id().to_string())
///         .await?;
///     assert_eq!(found.len(), 1);
///
///     let page = storage.list_persons(&PageRequest::new(1, 10)).await?;
///     assert!(!page.is_empty());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait PersonStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> StorageResult<()>;

    /// Validates and inserts a new person.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - If the body does not satisfy the schema
    async fn create_person(&self, body: Value) -> StorageResult<Person>;

    /// Reads one person joined with its company.
    ///
    /// Returns an empty vector when no person has the given id, otherwise a
    /// single element whose company sequence holds zero or one entries.
    ///
    /// # Errors
    ///
    /// * `StorageError::Identifier` - If `id`, or the matched person's
    ///   `companyId`, is not a valid identifier
    async fn read_person_with_company(&self, id: &str) -> StorageResult<Vec<PersonWithCompany>>;

    /// Merges a partial update into a person and returns the new state.
    ///
    /// Returns `None` when no person has the given id.
    async fn update_person(&self, id: &str, patch: Value) -> StorageResult<Option<Person>>;

    /// Removes a person and returns its prior state.
    ///
    /// Returns `None` when no person has the given id.
    async fn delete_person(&self, id: &str) -> StorageResult<Option<Person>>;

    /// Returns one page of persons, newest first.
    async fn list_persons(&self, page: &PageRequest) -> StorageResult<Vec<Person>>;

    /// Counts all persons.
    async fn count_persons(&self) -> StorageResult<u64>;

    /// Finds persons matching a search query, sorted ascending by name.
    async fn search_persons(&self, query: &SearchQuery) -> StorageResult<Vec<Person>>;
}


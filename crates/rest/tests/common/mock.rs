//! Counting mock storage.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use roster_persistence::core::PersonStorage;
use roster_persistence::error::{BackendError, StorageError, StorageResult};
use roster_persistence::types::{PageRequest, Person, PersonWithCompany, SearchQuery};
use serde_json::Value;

/// Storage that counts every call and fails every operation, optionally
/// after a delay.
#[derive(Default)]
pub struct CountingStorage {
    calls: AtomicUsize,
    delay: Duration,
}

impl CountingStorage {
    /// Storage that waits `delay` before failing each call.
    pub fn stalled(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Returns how many storage calls were made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn fail<T>(&self) -> StorageResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Err(StorageError::Backend(BackendError::Unavailable {
            backend_name: "counting".to_string(),
            message: "offline".to_string(),
        }))
    }
}

#[async_trait]
impl PersonStorage for CountingStorage {
    fn backend_name(&self) -> &'static str {
        "counting"
    }

    async fn ping(&self) -> StorageResult<()> {
        self.fail().await
    }

    async fn create_person(&self, _body: Value) -> StorageResult<Person> {
        self.fail().await
    }

    async fn read_person_with_company(&self, _id: &str) -> StorageResult<Vec<PersonWithCompany>> {
        self.fail().await
    }

    async fn update_person(&self, _id: &str, _patch: Value) -> StorageResult<Option<Person>> {
        self.fail().await
    }

    async fn delete_person(&self, _id: &str) -> StorageResult<Option<Person>> {
        self.fail().await
    }

    async fn list_persons(&self, _page: &PageRequest) -> StorageResult<Vec<Person>> {
        self.fail().await
    }

    async fn count_persons(&self) -> StorageResult<u64> {
        self.fail().await
    }

    async fn search_persons(&self, _query: &SearchQuery) -> StorageResult<Vec<Person>> {
        self.fail().await
    }
}

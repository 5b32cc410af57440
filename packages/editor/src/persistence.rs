//! # Persistence Service
//!
//! The two remote operations the editor depends on. Transport, auth and
//! storage format belong to the implementation.

use async_trait::async_trait;
use pagecraft_document::{DocumentError, PageDocument};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    #[error("No document stored for '{0}'")]
    NotFound(String),

    #[error("Update failed: {0}")]
    Failure(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Stored document is invalid: {0}")]
    Document(#[from] DocumentError),
}

impl PersistenceError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, PersistenceError::Failure(_) | PersistenceError::Timeout(_))
    }
}

/// Fetch and update one document per owner
#[async_trait]
pub trait PersistenceService: Send + Sync {
    async fn fetch_document(&self, owner_id: &str) -> Result<PageDocument, PersistenceError>;

    /// Replace the owner's whole document
    async fn update_document(
        &self,
        owner_id: &str,
        document: &PageDocument,
    ) -> Result<(), PersistenceError>;
}

#[async_trait]
impl<T: PersistenceService + ?Sized> PersistenceService for Arc<T> {
    async fn fetch_document(&self, owner_id: &str) -> Result<PageDocument, PersistenceError> {
        (**self).fetch_document(owner_id).await
    }

    async fn update_document(
        &self,
        owner_id: &str,
        document: &PageDocument,
    ) -> Result<(), PersistenceError> {
        (**self).update_document(owner_id, document).await
    }
}

/// In-memory persistence with optional latency and scripted failures
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    documents: Mutex<HashMap<String, PageDocument>>,
    scripted_failures: Mutex<VecDeque<String>>,
    latency: Option<Duration>,
    updates: AtomicUsize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, owner_id: impl Into<String>, document: PageDocument) -> Self {
        lock(&self.documents).insert(owner_id.into(), document);
        self
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make the next update fail with `reason`
    pub fn fail_next_update(&self, reason: impl Into<String>) {
        lock(&self.scripted_failures).push_back(reason.into());
    }

    pub fn stored(&self, owner_id: &str) -> Option<PageDocument> {
        lock(&self.documents).get(owner_id).cloned()
    }

    /// Number of successful updates so far
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl PersistenceService for MemoryPersistence {
    async fn fetch_document(&self, owner_id: &str) -> Result<PageDocument, PersistenceError> {
        self.delay().await;
        self.stored(owner_id)
            .ok_or_else(|| PersistenceError::NotFound(owner_id.to_string()))
    }

    async fn update_document(
        &self,
        owner_id: &str,
        document: &PageDocument,
    ) -> Result<(), PersistenceError> {
        self.delay().await;

        if let Some(reason) = lock(&self.scripted_failures).pop_front() {
            return Err(PersistenceError::Failure(reason));
        }

        lock(&self.documents).insert(owner_id.to_string(), document.clone());
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_missing_owner() {
        let store = MemoryPersistence::new();
        assert_eq!(
            store.fetch_document("nobody").await,
            Err(PersistenceError::NotFound("nobody".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_then_fetch() {
        let store = MemoryPersistence::new();
        let doc = PageDocument::seed();

        store.update_document("dr-1", &doc).await.unwrap();

        assert_eq!(store.fetch_document("dr-1").await.unwrap(), doc);
        assert_eq!(store.update_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_failure_applies_once() {
        let store = MemoryPersistence::new();
        store.fail_next_update("network down");
        let doc = PageDocument::seed();

        let first = store.update_document("dr-1", &doc).await;
        assert_eq!(first, Err(PersistenceError::Failure("network down".to_string())));
        assert!(store.stored("dr-1").is_none());

        store.update_document("dr-1", &doc).await.unwrap();
        assert!(store.stored("dr-1").is_some());
    }

    #[test]
    fn test_retryable() {
        assert!(PersistenceError::Failure("x".into()).is_retryable());
        assert!(PersistenceError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!PersistenceError::NotFound("x".into()).is_retryable());
    }
}

//! Score submission persistence abstract Trait

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::types::ScoreRecord;

/// Submission Store Trait
///
/// Append-only record set keyed by email. There are no update or delete
/// operations.
///
/// Implementations:
/// - `InMemorySubmissionStore` (this module)
/// - `SqliteStore` (`scorecard-app`, unique index on `email`)
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Whether at least one record exists for the email.
    async fn exists_for(&self, email: &str) -> CoreResult<bool>;

    /// Append a record.
    ///
    /// # Errors
    /// `CoreError::AlreadySubmitted` if the email already has a record.
    async fn append(&self, record: &ScoreRecord) -> CoreResult<()>;

    /// Most recently appended record for the email.
    async fn latest_for(&self, email: &str) -> CoreResult<Option<ScoreRecord>>;

    /// Number of stored records.
    async fn count(&self) -> CoreResult<usize>;
}

/// In-memory submission store
///
/// Records are kept in append order.
#[derive(Clone, Default)]
pub struct InMemorySubmissionStore {
    records: Arc<RwLock<Vec<ScoreRecord>>>,
}

impl InMemorySubmissionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn exists_for(&self, email: &str) -> CoreResult<bool> {
        Ok(self.records.read().await.iter().any(|r| r.email == email))
    }

    async fn append(&self, record: &ScoreRecord) -> CoreResult<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.email == record.email) {
            return Err(CoreError::AlreadySubmitted(record.email.clone()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn latest_for(&self, email: &str) -> CoreResult<Option<ScoreRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .find(|r| r.email == email)
            .cloned())
    }

    async fn count(&self) -> CoreResult<usize> {
        Ok(self.records.read().await.len())
    }
}

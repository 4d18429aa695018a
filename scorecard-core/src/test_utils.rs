//! Test helpers
//!
//! Failing store mock and service factories.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::services::{AuthService, ServiceContext, SubmissionService};
use crate::traits::{
    CredentialStore, InMemoryCredentialStore, InMemorySubmissionStore, SubmissionStore,
};
use crate::types::{ScoreRecord, User};

// ===== FailingStore =====

/// Store whose every call fails as if the disk were gone.
pub struct FailingStore;

fn disk_error() -> CoreError {
    CoreError::StorageError("disk unavailable".to_string())
}

#[async_trait]
impl CredentialStore for FailingStore {
    async fn contains(&self, _email: &str) -> CoreResult<bool> {
        Err(disk_error())
    }

    async fn insert(&self, _user: &User) -> CoreResult<()> {
        Err(disk_error())
    }

    async fn find_digest(&self, _email: &str) -> CoreResult<Option<String>> {
        Err(disk_error())
    }

    async fn count(&self) -> CoreResult<usize> {
        Err(disk_error())
    }
}

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn exists_for(&self, _email: &str) -> CoreResult<bool> {
        Err(disk_error())
    }

    async fn append(&self, _record: &ScoreRecord) -> CoreResult<()> {
        Err(disk_error())
    }

    async fn latest_for(&self, _email: &str) -> CoreResult<Option<ScoreRecord>> {
        Err(disk_error())
    }

    async fn count(&self) -> CoreResult<usize> {
        Err(disk_error())
    }
}

// ===== Factories =====

/// Services over fresh in-memory stores.
pub fn create_test_services() -> (AuthService, SubmissionService, Arc<ServiceContext>) {
    let ctx = Arc::new(ServiceContext::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(InMemorySubmissionStore::new()),
    ));
    (
        AuthService::new(Arc::clone(&ctx)),
        SubmissionService::new(Arc::clone(&ctx)),
        ctx,
    )
}

/// Services whose stores always fail.
pub fn create_failing_services() -> (AuthService, SubmissionService) {
    let store = Arc::new(FailingStore);
    let ctx = Arc::new(ServiceContext::new(store.clone(), store));
    (
        AuthService::new(Arc::clone(&ctx)),
        SubmissionService::new(ctx),
    )
}

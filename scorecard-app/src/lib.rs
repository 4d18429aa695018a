//! Platform-agnostic application bootstrap for Scorecard.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection). Storage adapters live in [`adapters`].

pub mod adapters;

use std::sync::Arc;

use scorecard_core::error::{CoreError, CoreResult};
use scorecard_core::services::{
    AuthService, LegacyImportService, ServiceContext, SubmissionService,
};
use scorecard_core::traits::{CredentialStore, SubmissionStore};

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all storage adapters)
    pub ctx: Arc<ServiceContext>,
    /// Registration, login and sessions
    pub auth_service: AuthService,
    /// Score submissions and chart data
    pub submission_service: SubmissionService,
    /// Legacy `users.json` / `marks.csv` import
    pub import_service: LegacyImportService,
}

impl AppState {
    /// Log how much data the configured stores hold.
    pub async fn log_summary(&self) {
        let users = self.ctx.credential_store().count().await;
        let submissions = self.ctx.submission_store().count().await;
        match (users, submissions) {
            (Ok(users), Ok(submissions)) => {
                log::info!("Store loaded: {users} users, {submissions} submissions");
            }
            (Err(e), _) | (_, Err(e)) => log::warn!("Failed to read store summary: {e}"),
        }
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `credential_store`: where password digests are stored
/// - `submission_store`: where score records are stored
pub struct AppStateBuilder {
    credential_store: Option<Arc<dyn CredentialStore>>,
    submission_store: Option<Arc<dyn SubmissionStore>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            credential_store: None,
            submission_store: None,
        }
    }

    #[must_use]
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    #[must_use]
    pub fn submission_store(mut self, store: Arc<dyn SubmissionStore>) -> Self {
        self.submission_store = Some(store);
        self
    }

    /// Use one `SqliteStore` for both adapters.
    #[cfg(feature = "sqlite-store")]
    #[must_use]
    pub fn sqlite_store(self, store: Arc<adapters::SqliteStore>) -> Self {
        self.credential_store(store.clone()).submission_store(store)
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let credential_store = self.credential_store.ok_or_else(|| {
            CoreError::ValidationError("credential_store is required".to_string())
        })?;
        let submission_store = self.submission_store.ok_or_else(|| {
            CoreError::ValidationError("submission_store is required".to_string())
        })?;

        let ctx = Arc::new(ServiceContext::new(credential_store, submission_store));

        Ok(AppState {
            auth_service: AuthService::new(Arc::clone(&ctx)),
            submission_service: SubmissionService::new(Arc::clone(&ctx)),
            import_service: LegacyImportService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

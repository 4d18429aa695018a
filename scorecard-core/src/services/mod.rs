//! Business logic services

mod auth_service;
mod legacy_import_service;
mod submission_service;

pub use auth_service::AuthService;
pub use legacy_import_service::LegacyImportService;
pub use submission_service::SubmissionService;

use std::sync::Arc;

use crate::traits::{CredentialStore, SubmissionStore};

/// Service context holding every storage dependency
///
/// The platform layer creates it and injects its own store implementations.
pub struct ServiceContext {
    /// Credential storage
    credential_store: Arc<dyn CredentialStore>,
    /// Submission storage
    submission_store: Arc<dyn SubmissionStore>,
}

impl ServiceContext {
    /// Create the service context
    #[must_use]
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        submission_store: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            credential_store,
            submission_store,
        }
    }

    /// Credential store adapter
    #[must_use]
    pub fn credential_store(&self) -> &Arc<dyn CredentialStore> {
        &self.credential_store
    }

    /// Submission store adapter
    #[must_use]
    pub fn submission_store(&self) -> &Arc<dyn SubmissionStore> {
        &self.submission_store
    }
}

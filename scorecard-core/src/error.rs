//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Signup attempted with an email that already has credentials
    #[error("Email already registered: {0}")]
    AlreadyRegistered(String),

    /// A second submission for an email that already has one
    #[error("Marks already submitted for: {0}")]
    AlreadySubmitted(String),

    /// No submission exists for the email
    #[error("No marks found for: {0}")]
    NotFound(String),

    /// Email/password mismatch where a session is required
    #[error("Invalid email or password for: {0}")]
    InvalidCredentials(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Legacy file import error
    #[error("Import error: {0}")]
    ImportError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::AlreadyRegistered(_)
            | Self::AlreadySubmitted(_)
            | Self::NotFound(_)
            | Self::InvalidCredentials(_)
            | Self::ValidationError(_) => true,
            Self::SerializationError(_) | Self::ImportError(_) | Self::StorageError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

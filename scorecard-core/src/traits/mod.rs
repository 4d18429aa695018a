//! Storage layer abstraction trait definition

mod credential_store;
mod submission_store;

pub use credential_store::{CredentialStore, InMemoryCredentialStore};
pub use submission_store::{InMemorySubmissionStore, SubmissionStore};

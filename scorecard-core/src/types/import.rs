//! Legacy import related types.

use serde::{Deserialize, Serialize};

/// Which legacy file a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportSource {
    Users,
    Marks,
}

/// A single entry that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    pub source: ImportSource,
    /// Email, or `line N` when the row has no usable email.
    pub key: String,
    pub reason: String,
}

/// Outcome of a legacy import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub users_imported: usize,
    /// Users whose email was already registered.
    pub users_skipped: usize,
    pub submissions_imported: usize,
    /// Submissions whose email already had marks.
    pub submissions_skipped: usize,
    pub failures: Vec<ImportFailure>,
}

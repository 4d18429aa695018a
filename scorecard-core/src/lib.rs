//! Scorecard Core Library
//!
//! Provides the core business logic of the score submission application:
//! - Authentication (`AuthService`): registration, login, explicit sessions
//! - Submissions (`SubmissionService`): one set of subject scores per user
//! - Chart data (`ChartSet`): bar, line and pie views over a submission
//! - Legacy import (`LegacyImportService`): `users.json` / `marks.csv` files
//!
//! Storage is abstracted through traits so frontends can plug in the
//! in-memory stores shipped here or a database-backed adapter.

pub mod crypto;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{CredentialStore, SubmissionStore};

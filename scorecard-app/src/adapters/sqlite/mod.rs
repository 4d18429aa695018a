//! SQLite-based unified store using `SeaORM`.
//!
//! A single `SqliteStore` implements `CredentialStore` and `SubmissionStore`,
//! backed by a local `SQLite` database. Uniqueness of users and submissions
//! is enforced by the schema, so concurrent writers cannot create duplicates.

mod credential_store;
pub(crate) mod entity;
mod migration;
mod submission_store;

use std::path::Path;

use scorecard_core::error::{CoreError, CoreResult};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use migration::Migrator;

/// SQLite-based unified store for local frontends.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`.
    ///
    /// Parent directories are created and the schema is brought up to date
    /// before the store is returned.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        log::debug!("SQLite store ready at {}", db_path.display());
        Ok(store)
    }
}

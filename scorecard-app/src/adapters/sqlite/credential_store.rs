//! `CredentialStore` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, EntityTrait, PaginatorTrait};

use scorecard_core::error::{CoreError, CoreResult};
use scorecard_core::traits::CredentialStore;
use scorecard_core::types::User;

use super::entity::user;
use super::SqliteStore;

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn contains(&self, email: &str) -> CoreResult<bool> {
        Ok(self.find_digest(email).await?.is_some())
    }

    async fn insert(&self, user: &User) -> CoreResult<()> {
        let active_model = user::ActiveModel {
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at.to_rfc3339()),
        };

        // ON CONFLICT DO NOTHING makes check-and-insert a single statement.
        let inserted = user::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(user::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save user: {e}")))?;

        if inserted == 0 {
            return Err(CoreError::AlreadyRegistered(user.email.clone()));
        }
        Ok(())
    }

    async fn find_digest(&self, email: &str) -> CoreResult<Option<String>> {
        let row = user::Entity::find_by_id(email)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query user: {e}")))?;

        Ok(row.map(|r| r.password_hash))
    }

    async fn count(&self) -> CoreResult<usize> {
        let count = user::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to count users: {e}")))?;

        usize::try_from(count).map_err(|e| CoreError::StorageError(e.to_string()))
    }
}

//! `SubmissionStore` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use scorecard_core::error::{CoreError, CoreResult};
use scorecard_core::traits::SubmissionStore;
use scorecard_core::types::{ScoreRecord, Scores};
use scorecard_core::utils::datetime;

use super::entity::submission;
use super::SqliteStore;

impl submission::Model {
    /// Convert a `SeaORM` row model into a domain `ScoreRecord`.
    ///
    /// Score columns are range-checked on the way out.
    fn into_record(self) -> CoreResult<ScoreRecord> {
        let scores = Scores::try_from_values(
            i64::from(self.aai),
            i64::from(self.foml),
            i64::from(self.imad),
            i64::from(self.vcc),
        )
        .map_err(|e| CoreError::SerializationError(format!("Invalid stored scores: {e}")))?;

        Ok(ScoreRecord {
            submitted_at: datetime::parse_rfc3339(&self.submitted_at, "submitted_at")?,
            email: self.email,
            display_name: self.display_name,
            scores,
        })
    }
}

fn record_to_active_model(record: &ScoreRecord) -> submission::ActiveModel {
    submission::ActiveModel {
        id: NotSet,
        email: Set(record.email.clone()),
        display_name: Set(record.display_name.clone()),
        aai: Set(i32::from(record.scores.aai)),
        foml: Set(i32::from(record.scores.foml)),
        imad: Set(i32::from(record.scores.imad)),
        vcc: Set(i32::from(record.scores.vcc)),
        submitted_at: Set(record.submitted_at.to_rfc3339()),
    }
}

#[async_trait]
impl SubmissionStore for SqliteStore {
    async fn exists_for(&self, email: &str) -> CoreResult<bool> {
        let count = submission::Entity::find()
            .filter(submission::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query submissions: {e}")))?;

        Ok(count > 0)
    }

    async fn append(&self, record: &ScoreRecord) -> CoreResult<()> {
        let inserted = submission::Entity::insert(record_to_active_model(record))
            .on_conflict(
                OnConflict::column(submission::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save submission: {e}")))?;

        if inserted == 0 {
            return Err(CoreError::AlreadySubmitted(record.email.clone()));
        }
        Ok(())
    }

    async fn latest_for(&self, email: &str) -> CoreResult<Option<ScoreRecord>> {
        let row = submission::Entity::find()
            .filter(submission::Column::Email.eq(email))
            .order_by_desc(submission::Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query submission: {e}")))?;

        row.map(submission::Model::into_record).transpose()
    }

    async fn count(&self) -> CoreResult<usize> {
        let count = submission::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to count submissions: {e}")))?;

        usize::try_from(count).map_err(|e| CoreError::StorageError(e.to_string()))
    }
}

//! Score submission service

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{ChartSet, ScoreRecord, Scores, Session};

/// Score submission service
///
/// Each user submits once. After that the record is read-only.
pub struct SubmissionService {
    ctx: Arc<ServiceContext>,
}

impl SubmissionService {
    /// Create a submission service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Whether the email has submitted marks.
    pub async fn has_submitted(&self, email: &str) -> CoreResult<bool> {
        self.ctx.submission_store().exists_for(email).await
    }

    /// Submit marks for the session's user.
    ///
    /// `display_name` falls back to the session's display name.
    ///
    /// # Errors
    /// - `ValidationError` if a score is out of range
    /// - `InvalidCredentials` if the session's email has no credentials
    /// - `AlreadySubmitted` if the user already has a record (checked here
    ///   and enforced again by the store)
    pub async fn submit(
        &self,
        session: &Session,
        display_name: Option<String>,
        scores: Scores,
    ) -> CoreResult<ScoreRecord> {
        scores.validate()?;
        let email = session.email();

        if !self.ctx.credential_store().contains(email).await? {
            log::warn!("Submission for unregistered email: {email}");
            return Err(CoreError::InvalidCredentials(email.to_string()));
        }
        if self.has_submitted(email).await? {
            return Err(CoreError::AlreadySubmitted(email.to_string()));
        }

        let display_name = display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| session.display_name().to_string());
        let record = ScoreRecord::new(email.to_string(), display_name, scores);
        self.ctx.submission_store().append(&record).await?;

        log::info!("Marks submitted for: {email}");
        Ok(record)
    }

    /// Latest record for the email, if any.
    pub async fn latest_for(&self, email: &str) -> CoreResult<Option<ScoreRecord>> {
        self.ctx.submission_store().latest_for(email).await
    }

    /// Latest record for the email.
    ///
    /// # Errors
    /// `NotFound` if the email has no record.
    pub async fn require_latest(&self, email: &str) -> CoreResult<ScoreRecord> {
        self.latest_for(email)
            .await?
            .ok_or_else(|| CoreError::NotFound(email.to_string()))
    }

    /// Chart views over the latest record for the email.
    pub async fn charts_for(&self, email: &str) -> CoreResult<ChartSet> {
        let record = self.require_latest(email).await?;
        Ok(ChartSet::from_record(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::AuthService;
    use crate::test_utils::{create_failing_services, create_test_services};

    fn sample_scores() -> Scores {
        Scores::new(80, 70, 90, 60).unwrap()
    }

    async fn logged_in(auth: &AuthService, email: &str) -> Session {
        auth.register(email, "pw1").await.unwrap();
        auth.login(email, "pw1").await.unwrap()
    }

    #[tokio::test]
    async fn full_flow_register_login_submit_read() {
        let (auth, submissions, _) = create_test_services();

        auth.register("a@x.com", "pw1").await.unwrap();
        assert!(auth.authenticate("a@x.com", "pw1").await.unwrap());
        let session = auth.login("a@x.com", "pw1").await.unwrap();

        assert!(!submissions.has_submitted("a@x.com").await.unwrap());
        submissions
            .submit(&session, None, sample_scores())
            .await
            .unwrap();

        let latest = submissions.latest_for("a@x.com").await.unwrap().unwrap();
        assert_eq!(latest.scores.aai, 80);
        assert_eq!(latest.scores.foml, 70);
        assert_eq!(latest.scores.imad, 90);
        assert_eq!(latest.scores.vcc, 60);
        assert!(submissions.has_submitted("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn latest_round_trips_exact_record() {
        let (auth, submissions, _) = create_test_services();
        let session = logged_in(&auth, "a@x.com").await;

        let record = submissions
            .submit(&session, Some("Alice".to_string()), sample_scores())
            .await
            .unwrap();

        assert_eq!(record.display_name, "Alice");
        assert_eq!(
            submissions.latest_for("a@x.com").await.unwrap(),
            Some(record)
        );
    }

    #[tokio::test]
    async fn blank_display_name_falls_back_to_session() {
        let (auth, submissions, _) = create_test_services();
        let session = logged_in(&auth, "a@x.com").await;

        let record = submissions
            .submit(&session, Some("   ".to_string()), sample_scores())
            .await
            .unwrap();
        assert_eq!(record.display_name, session.display_name());
        assert_eq!(record.display_name, "a@x.com");
    }

    #[tokio::test]
    async fn unregistered_session_cannot_submit() {
        let (_, submissions, ctx) = create_test_services();
        let session = Session::new("ghost@x.com".to_string());

        let err = submissions
            .submit(&session, None, sample_scores())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidCredentials(_)));
        assert!(!submissions.has_submitted("ghost@x.com").await.unwrap());
        assert_eq!(ctx.submission_store().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn second_submit_is_rejected() {
        let (auth, submissions, ctx) = create_test_services();
        let session = logged_in(&auth, "a@x.com").await;

        submissions
            .submit(&session, None, sample_scores())
            .await
            .unwrap();
        let err = submissions
            .submit(&session, None, Scores::new(1, 2, 3, 4).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::AlreadySubmitted(_)));
        assert_eq!(ctx.submission_store().count().await.unwrap(), 1);
        assert_eq!(
            submissions.require_latest("a@x.com").await.unwrap().scores,
            sample_scores()
        );
    }

    #[tokio::test]
    async fn out_of_range_scores_are_not_stored() {
        let (auth, submissions, _) = create_test_services();
        let session = logged_in(&auth, "a@x.com").await;
        let bad = Scores {
            aai: 101,
            foml: 0,
            imad: 0,
            vcc: 0,
        };

        let err = submissions.submit(&session, None, bad).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(!submissions.has_submitted("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let (_, submissions, _) = create_test_services();
        assert_eq!(submissions.latest_for("a@x.com").await.unwrap(), None);
        assert!(matches!(
            submissions.require_latest("a@x.com").await,
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(
            submissions.charts_for("a@x.com").await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn charts_follow_latest_record() {
        let (auth, submissions, _) = create_test_services();
        let session = logged_in(&auth, "a@x.com").await;
        submissions
            .submit(&session, None, sample_scores())
            .await
            .unwrap();

        let charts = submissions.charts_for("a@x.com").await.unwrap();
        assert_eq!(charts.bar.points.len(), 4);
        assert_eq!(charts.pie.slices[0].value, 80);
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_error() {
        let (_, submissions) = create_failing_services();
        let session = Session::new("a@x.com".to_string());
        let err = submissions
            .submit(&session, None, sample_scores())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
    }
}

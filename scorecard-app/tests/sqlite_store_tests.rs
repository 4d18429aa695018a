#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `SqliteStore`: covers the `CredentialStore` and
//! `SubmissionStore` trait implementations.

use std::sync::Arc;

use scorecard_app::adapters::SqliteStore;
use scorecard_core::crypto;
use scorecard_core::error::CoreError;
use scorecard_core::traits::{CredentialStore, SubmissionStore};
use scorecard_core::types::{ScoreRecord, Scores, User};

// ===== Helpers =====

async fn create_test_store() -> (SqliteStore, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = tmp.path().join("test.db");
    let store = SqliteStore::new(&db_path)
        .await
        .expect("failed to create SqliteStore");
    (store, tmp)
}

fn make_user(email: &str, password: &str) -> User {
    User::new(email.to_string(), crypto::digest_password(password))
}

fn make_record(email: &str, aai: u8, foml: u8, imad: u8, vcc: u8) -> ScoreRecord {
    ScoreRecord::new(
        email.to_string(),
        format!("Student {email}"),
        Scores::new(aai, foml, imad, vcc).unwrap(),
    )
}

// ===== CredentialStore Tests =====

#[tokio::test]
async fn credential_empty_store() {
    let (store, _tmp) = create_test_store().await;
    assert!(!store.contains("a@x.com").await.unwrap());
    assert_eq!(store.find_digest("a@x.com").await.unwrap(), None);
    assert_eq!(CredentialStore::count(&store).await.unwrap(), 0);
}

#[tokio::test]
async fn credential_insert_and_find() {
    let (store, _tmp) = create_test_store().await;
    store.insert(&make_user("a@x.com", "pw1")).await.unwrap();

    assert!(store.contains("a@x.com").await.unwrap());
    assert_eq!(
        store.find_digest("a@x.com").await.unwrap(),
        Some(crypto::digest_password("pw1"))
    );
}

#[tokio::test]
async fn credential_duplicate_insert_returns_already_registered() {
    let (store, _tmp) = create_test_store().await;
    store.insert(&make_user("a@x.com", "pw1")).await.unwrap();

    let err = store.insert(&make_user("a@x.com", "pw2")).await.unwrap_err();
    assert!(matches!(err, CoreError::AlreadyRegistered(ref e) if e == "a@x.com"));

    // first digest wins
    assert_eq!(
        store.find_digest("a@x.com").await.unwrap(),
        Some(crypto::digest_password("pw1"))
    );
    assert_eq!(CredentialStore::count(&store).await.unwrap(), 1);
}

#[tokio::test]
async fn credential_emails_are_case_sensitive_keys() {
    let (store, _tmp) = create_test_store().await;
    store.insert(&make_user("a@x.com", "pw1")).await.unwrap();
    assert!(!store.contains("A@X.COM").await.unwrap());
}

// ===== SubmissionStore Tests =====

#[tokio::test]
async fn submission_empty_store() {
    let (store, _tmp) = create_test_store().await;
    assert!(!store.exists_for("a@x.com").await.unwrap());
    assert_eq!(store.latest_for("a@x.com").await.unwrap(), None);
    assert_eq!(SubmissionStore::count(&store).await.unwrap(), 0);
}

#[tokio::test]
async fn submission_append_and_latest_round_trip() {
    let (store, _tmp) = create_test_store().await;
    let record = make_record("a@x.com", 80, 70, 90, 60);
    store.append(&record).await.unwrap();

    assert!(store.exists_for("a@x.com").await.unwrap());
    let found = store.latest_for("a@x.com").await.unwrap().unwrap();
    assert_eq!(found, record);
    assert_eq!(found.scores.aai, 80);
    assert_eq!(found.scores.foml, 70);
    assert_eq!(found.scores.imad, 90);
    assert_eq!(found.scores.vcc, 60);
}

#[tokio::test]
async fn submission_second_append_returns_already_submitted() {
    let (store, _tmp) = create_test_store().await;
    store
        .append(&make_record("a@x.com", 80, 70, 90, 60))
        .await
        .unwrap();

    let err = store
        .append(&make_record("a@x.com", 1, 2, 3, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::AlreadySubmitted(_)));

    assert_eq!(SubmissionStore::count(&store).await.unwrap(), 1);
    let found = store.latest_for("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.scores, Scores::new(80, 70, 90, 60).unwrap());
}

#[tokio::test]
async fn submission_records_are_isolated_per_email() {
    let (store, _tmp) = create_test_store().await;
    store
        .append(&make_record("a@x.com", 80, 70, 90, 60))
        .await
        .unwrap();
    store
        .append(&make_record("b@x.com", 0, 100, 0, 100))
        .await
        .unwrap();

    let b = store.latest_for("b@x.com").await.unwrap().unwrap();
    assert_eq!(b.scores, Scores::new(0, 100, 0, 100).unwrap());
    assert_eq!(SubmissionStore::count(&store).await.unwrap(), 2);
}

#[tokio::test]
async fn concurrent_appends_store_exactly_one() {
    let (store, _tmp) = create_test_store().await;
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.append(&make_record("a@x.com", i, i, i, i)).await })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => ok += 1,
            Err(CoreError::AlreadySubmitted(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(SubmissionStore::count(&*store).await.unwrap(), 1);
}

// ===== Persistence Tests =====

#[tokio::test]
async fn data_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("nested").join("scorecard.db");
    let record = make_record("a@x.com", 80, 70, 90, 60);

    {
        let store = SqliteStore::new(&db_path).await.unwrap();
        store.insert(&make_user("a@x.com", "pw1")).await.unwrap();
        store.append(&record).await.unwrap();
    }

    let reopened = SqliteStore::new(&db_path).await.unwrap();
    assert_eq!(
        reopened.find_digest("a@x.com").await.unwrap(),
        Some(crypto::digest_password("pw1"))
    );
    assert_eq!(reopened.latest_for("a@x.com").await.unwrap(), Some(record));
}

//! Credential storage trait

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::types::User;

/// Credential Store Trait
///
/// Persists `email -> password digest`. The store never sees plaintext
/// passwords; digesting happens in `AuthService`.
///
/// Implementations:
/// - `InMemoryCredentialStore` (this module, tests and ephemeral runs)
/// - `SqliteStore` (`scorecard-app`, `SeaORM`)
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Whether the email has credentials.
    async fn contains(&self, email: &str) -> CoreResult<bool>;

    /// Insert a new user.
    ///
    /// # Errors
    /// `CoreError::AlreadyRegistered` if the email exists. The check and the
    /// write must be a single atomic step in the backing store.
    async fn insert(&self, user: &User) -> CoreResult<()>;

    /// Get the stored digest for an email.
    ///
    /// # Returns
    /// * `Ok(Some(digest))` - user exists
    /// * `Ok(None)` - unknown email
    async fn find_digest(&self, email: &str) -> CoreResult<Option<String>>;

    /// Number of registered users.
    async fn count(&self) -> CoreResult<usize>;
}

/// In-memory credential store
///
/// Default implementation, available on all platforms. Contents are lost
/// when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn contains(&self, email: &str) -> CoreResult<bool> {
        Ok(self.users.read().await.contains_key(email))
    }

    async fn insert(&self, user: &User) -> CoreResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(CoreError::AlreadyRegistered(user.email.clone()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn find_digest(&self, email: &str) -> CoreResult<Option<String>> {
        Ok(self
            .users
            .read()
            .await
            .get(email)
            .map(|u| u.password_hash.clone()))
    }

    async fn count(&self) -> CoreResult<usize> {
        Ok(self.users.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_find() {
        let store = InMemoryCredentialStore::new();
        store
            .insert(&User::new("a@x.com".into(), "d1".into()))
            .await
            .unwrap();
        assert!(store.contains("a@x.com").await.unwrap());
        assert_eq!(
            store.find_digest("a@x.com").await.unwrap().as_deref(),
            Some("d1")
        );
        assert_eq!(store.find_digest("b@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_insert_keeps_first_digest() {
        let store = InMemoryCredentialStore::new();
        store
            .insert(&User::new("a@x.com".into(), "d1".into()))
            .await
            .unwrap();
        let err = store
            .insert(&User::new("a@x.com".into(), "d2".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::AlreadyRegistered(_)));
        assert_eq!(
            store.find_digest("a@x.com").await.unwrap().as_deref(),
            Some("d1")
        );
        assert_eq!(store.count().await.unwrap(), 1);
    }
}

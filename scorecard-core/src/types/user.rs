//! User and session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered user
///
/// Created on signup, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique key
    pub email: String,
    /// Lowercase hex SHA-256 of the password
    pub password_hash: String,
    /// Signup time
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user record stamped with the current time.
    #[must_use]
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Authenticated session
///
/// Returned by a successful login and passed explicitly into every
/// operation that acts on behalf of the current user. Only the auth
/// service can open one, so holding a `Session` means the email belongs
/// to a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    email: String,
    display_name: String,
    #[serde(with = "crate::utils::datetime")]
    logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for `email`, using the email as display name.
    pub(crate) fn new(email: String) -> Self {
        Self {
            display_name: email.clone(),
            email,
            logged_in_at: Utc::now(),
        }
    }

    /// Email of the logged-in user.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Name shown to the user; defaults to the email.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn logged_in_at(&self) -> DateTime<Utc> {
        self.logged_in_at
    }
}

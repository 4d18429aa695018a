//! Authentication service
//!
//! Registration, credential checks and explicit sessions. There is no
//! process-wide "current user": a successful login returns a `Session`
//! that callers pass into the operations that need one.

use std::sync::Arc;

use crate::crypto;
use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{Session, User};

/// Authentication service
pub struct AuthService {
    ctx: Arc<ServiceContext>,
}

impl AuthService {
    /// Create an authentication service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Whether the email already has credentials.
    pub async fn is_registered(&self, email: &str) -> CoreResult<bool> {
        self.ctx.credential_store().contains(email).await
    }

    /// Register a new user.
    ///
    /// # Errors
    /// - `ValidationError` if email or password is empty
    /// - `AlreadyRegistered` if the email exists
    pub async fn register(&self, email: &str, password: &str) -> CoreResult<()> {
        require_present("email", email)?;
        require_present("password", password)?;

        let user = User::new(email.to_string(), crypto::digest_password(password));
        self.ctx.credential_store().insert(&user).await?;

        log::info!("Registered user: {email}");
        Ok(())
    }

    /// Check an email/password pair.
    ///
    /// Unknown emails and wrong passwords both yield `Ok(false)`. Only
    /// storage failures are errors.
    pub async fn authenticate(&self, email: &str, password: &str) -> CoreResult<bool> {
        let Some(stored) = self.ctx.credential_store().find_digest(email).await? else {
            log::debug!("Authentication for unknown email: {email}");
            return Ok(false);
        };
        Ok(crypto::verify_password(password, &stored))
    }

    /// Authenticate and open a session.
    ///
    /// # Errors
    /// `InvalidCredentials` when `authenticate` would return `false`.
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<Session> {
        if !self.authenticate(email, password).await? {
            log::warn!("Failed login for: {email}");
            return Err(CoreError::InvalidCredentials(email.to_string()));
        }
        log::info!("User logged in: {email}");
        Ok(Session::new(email.to_string()))
    }

    /// Close a session.
    #[allow(clippy::needless_pass_by_value)]
    pub fn logout(&self, session: Session) {
        log::info!("User logged out: {}", session.email());
    }
}

fn require_present(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

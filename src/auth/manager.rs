//! The auth controller: login, register, logout, and the session check.
//!
//! Every operation is one remote call bracketed by the session's
//! loading/error bookkeeping. Success paths mutate the token store and the
//! session together; failure paths record a displayable message and re-raise
//! the error, except for `check`, which reports plain `bool` and never
//! raises because it runs on every route transition.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, AuthApi, LoginRequest, RegisterRequest};
use crate::models::User;
use crate::router::{Navigator, SessionCheck, LOGIN_PATH};

use super::session::SessionHandle;
use super::token::{TokenStore, DEFAULT_TOKEN_TTL_DAYS};

const LOGIN_FALLBACK_ERROR: &str = "An error occurred during login";
const REGISTER_FALLBACK_ERROR: &str = "An error occurred during registration";
const LOGOUT_FALLBACK_ERROR: &str = "An error occurred during logout";

/// Drives the authentication lifecycle against the backend.
///
/// Holds the only write access to both the token store and the session
/// record, so the two cannot drift apart.
pub struct AuthManager {
    api: Arc<dyn AuthApi>,
    tokens: Arc<TokenStore>,
    session: SessionHandle,
    navigator: Arc<dyn Navigator>,
}

impl AuthManager {
    pub fn new(
        api: Arc<dyn AuthApi>,
        tokens: Arc<TokenStore>,
        session: SessionHandle,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            tokens,
            session,
            navigator,
        }
    }

    /// Authenticate against `POST /login`.
    ///
    /// On success the token is persisted for seven days and the session user
    /// is set. On failure the session error carries the server's message (or
    /// a generic fallback) and the error is re-raised.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<User, ApiError> {
        let _loading = self.session.begin_op().await;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            remember,
        };

        match self.api.login(&request).await {
            Ok(payload) => {
                self.store_token(&payload.token);
                self.session.set_user(payload.user.clone()).await;
                info!("Login succeeded");
                Ok(payload.user)
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.record_failure(&e, LOGIN_FALLBACK_ERROR).await;
                Err(e)
            }
        }
    }

    /// Create an account via `POST /register`; the backend logs the new
    /// account straight in, so success behaves exactly like a login.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<User, ApiError> {
        let _loading = self.session.begin_op().await;

        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirmation: password_confirmation.to_string(),
        };

        match self.api.register(&request).await {
            Ok(payload) => {
                self.store_token(&payload.token);
                self.session.set_user(payload.user.clone()).await;
                info!("Registration succeeded");
                Ok(payload.user)
            }
            Err(e) => {
                error!(error = %e, "Registration failed");
                self.record_failure(&e, REGISTER_FALLBACK_ERROR).await;
                Err(e)
            }
        }
    }

    /// End the session via `POST /logout`, then drop the token, clear the
    /// user, and navigate to the login page.
    ///
    /// On failure the token and user are left in place; the server still
    /// considers the session live.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _loading = self.session.begin_op().await;

        match self.api.logout().await {
            Ok(()) => {
                self.discard_token();
                self.session.clear_user().await;
                self.navigator.push(LOGIN_PATH);
                info!("Logout succeeded");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Logout failed");
                self.record_failure(&e, LOGOUT_FALLBACK_ERROR).await;
                Err(e)
            }
        }
    }

    /// Probe whether the stored token still names a live session.
    ///
    /// Runs on every route transition, so it never raises and touches
    /// neither `loading` nor `error`. Without a usable token it answers
    /// false immediately, no network involved. A token the backend rejects
    /// is purged along with the session user.
    pub async fn check(&self) -> bool {
        if self.tokens.get().is_none() {
            return false;
        }

        match self.api.fetch_user().await {
            Ok(user) => {
                self.session.set_user(user).await;
                true
            }
            Err(e) => {
                debug!(error = %e, "Session check rejected, purging stale token");
                self.discard_token();
                self.session.clear_user().await;
                false
            }
        }
    }

    /// Persist the fresh token; a write failure is logged but does not fail
    /// the operation, the session simply won't survive a restart
    fn store_token(&self, token: &str) {
        if let Err(e) = self.tokens.set(token, DEFAULT_TOKEN_TTL_DAYS) {
            warn!(error = %e, "Failed to persist auth token");
        }
    }

    fn discard_token(&self) {
        if let Err(e) = self.tokens.remove() {
            warn!(error = %e, "Failed to remove auth token");
        }
    }

    async fn record_failure(&self, e: &ApiError, fallback: &str) {
        let message = e
            .server_message()
            .unwrap_or_else(|| fallback.to_string());
        self.session.set_error(message).await;
    }
}

#[async_trait]
impl SessionCheck for AuthManager {
    async fn check(&self) -> Result<bool, ApiError> {
        Ok(AuthManager::check(self).await)
    }
}

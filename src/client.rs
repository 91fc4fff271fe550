//! Top-level client wiring.
//!
//! `TaskdeckClient` assembles the pieces an embedding shell needs: the HTTP
//! client, the auth manager, the shared session state, and the navigation
//! guard, all bound to one token store and one navigator.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::api::{ApiClient, AuthApi};
use crate::auth::{AuthManager, SessionHandle, TokenStore};
use crate::config::ClientConfig;
use crate::router::{NavigationGuard, Navigator, RouteTable, SessionCheck};

pub struct TaskdeckClient {
    config: ClientConfig,
    tokens: Arc<TokenStore>,
    session: SessionHandle,
    api: Arc<ApiClient>,
    auth: Arc<AuthManager>,
    guard: NavigationGuard,
}

impl TaskdeckClient {
    /// Build a client from the on-disk config, with environment overrides
    /// applied. A missing or unreadable config falls back to defaults.
    pub fn new(navigator: Arc<dyn Navigator>) -> Result<Self> {
        let config = match ClientConfig::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                ClientConfig::default()
            }
        };
        Self::with_config(config, navigator)
    }

    pub fn with_config(config: ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let state_dir = config.state_dir()?;
        debug!(?state_dir, base_url = config.base_url(), "Building client");

        let tokens = Arc::new(TokenStore::new(state_dir));
        let session = SessionHandle::new();

        let api = Arc::new(
            ApiClient::new(&config, Arc::clone(&tokens))?.with_navigator(Arc::clone(&navigator)),
        );

        let auth = Arc::new(AuthManager::new(
            Arc::clone(&api) as Arc<dyn AuthApi>,
            Arc::clone(&tokens),
            session.clone(),
            navigator,
        ));

        let guard = NavigationGuard::new(
            Arc::clone(&auth) as Arc<dyn SessionCheck>,
            RouteTable::default(),
        );

        Ok(Self {
            config,
            tokens,
            session,
            api,
            auth,
            guard,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request wrapper for endpoints beyond the auth flows
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Shared session state, for shells that render user/loading/error
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Direct token store access, mainly for diagnostics
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use crate::router::GuardOutcome;

    use super::*;

    struct NullNavigator;

    impl Navigator for NullNavigator {
        fn push(&self, _path: &str) {}
    }

    fn test_config(dir: &tempfile::TempDir) -> ClientConfig {
        ClientConfig {
            api_base_url: Some("http://localhost:8000/api".to_string()),
            request_timeout_secs: Some(5),
            state_dir: Some(dir.path().to_path_buf()),
        }
    }

    #[tokio::test]
    async fn test_guard_decisions_without_a_stored_token() {
        let dir = tempfile::tempdir().unwrap();
        let client =
            TaskdeckClient::with_config(test_config(&dir), Arc::new(NullNavigator)).unwrap();

        // No stored token, so the session check answers false without
        // touching the network
        assert_eq!(client.guard().resolve("/").await, GuardOutcome::Proceed);
        assert_eq!(client.guard().resolve("/login").await, GuardOutcome::Proceed);
        assert_eq!(
            client.guard().resolve("/dashboard").await,
            GuardOutcome::Redirect("/login".to_string())
        );
        assert!(client.session().user().await.is_none());
        assert!(client.tokens().get().is_none());
    }
}

//! Per-transition authentication guard.
//!
//! Every route transition funnels through `NavigationGuard::resolve`, which
//! asks the session check whether a user is signed in and turns the answer
//! into one of three decisions: proceed, redirect, or discard. Overlapping
//! transitions are sequenced so only the newest one acts; a resolution that
//! was overtaken while awaiting the check reports `Superseded` instead of
//! steering the UI with a stale answer. A check that fails outright counts
//! as unauthenticated, so the guard lands on the login page.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::ApiError;

use super::{strip_query, RouteTable, HOME_PATH, LOGIN_PATH, REGISTER_PATH};

/// Answers "is there a live session right now?".
///
/// `AuthManager` is the production implementation; the guard depends on this
/// seam so tests can script answers, failures, and timing.
#[async_trait]
pub trait SessionCheck: Send + Sync {
    async fn check(&self) -> Result<bool, ApiError>;
}

/// What the guard decided for one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Carry on to the requested path
    Proceed,
    /// Go to this path instead
    Redirect(String),
    /// A newer navigation started while this one was checking; discard
    Superseded,
}

pub struct NavigationGuard {
    check: Arc<dyn SessionCheck>,
    routes: RouteTable,
    nav_seq: AtomicU64,
}

impl NavigationGuard {
    pub fn new(check: Arc<dyn SessionCheck>, routes: RouteTable) -> Self {
        Self {
            check,
            routes,
            nav_seq: AtomicU64::new(0),
        }
    }

    /// Decide one route transition to `path`.
    ///
    /// The session check is the only await point; if another `resolve` call
    /// starts during it, this resolution is stale and returns `Superseded`.
    pub async fn resolve(&self, path: &str) -> GuardOutcome {
        let ticket = self.nav_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(path, ticket, "Resolving route transition");

        let checked = self.check.check().await;

        if self.nav_seq.load(Ordering::SeqCst) != ticket {
            debug!(path, ticket, "Superseded by a newer navigation");
            return GuardOutcome::Superseded;
        }

        let authenticated = match checked {
            Ok(authenticated) => authenticated,
            Err(e) => {
                // Fail closed: an unanswerable check counts as signed out
                warn!(error = %e, path, "Session check failed, redirecting to login");
                return GuardOutcome::Redirect(LOGIN_PATH.to_string());
            }
        };

        let target = strip_query(path);

        if authenticated && (target == LOGIN_PATH || target == REGISTER_PATH) {
            debug!(path, "Already signed in, redirecting to home");
            return GuardOutcome::Redirect(HOME_PATH.to_string());
        }

        if self.routes.requires_auth(target) && !authenticated {
            debug!(path, "Protected route without a session, redirecting to login");
            return GuardOutcome::Redirect(LOGIN_PATH.to_string());
        }

        GuardOutcome::Proceed
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use tokio::sync::oneshot;

    use super::*;

    struct StaticCheck(bool);

    #[async_trait]
    impl SessionCheck for StaticCheck {
        async fn check(&self) -> Result<bool, ApiError> {
            Ok(self.0)
        }
    }

    struct FailingCheck;

    #[async_trait]
    impl SessionCheck for FailingCheck {
        async fn check(&self) -> Result<bool, ApiError> {
            Err(ApiError::ServerError("boom".to_string()))
        }
    }

    /// Each `check` call parks on the next gate until the test releases it,
    /// so overlapping resolutions can be completed in any order.
    struct GatedCheck {
        gates: tokio::sync::Mutex<VecDeque<oneshot::Receiver<Result<bool, ApiError>>>>,
    }

    fn gated(count: usize) -> (GatedCheck, Vec<oneshot::Sender<Result<bool, ApiError>>>) {
        let mut senders = Vec::new();
        let mut receivers = VecDeque::new();
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            receivers.push_back(rx);
        }
        let check = GatedCheck {
            gates: tokio::sync::Mutex::new(receivers),
        };
        (check, senders)
    }

    #[async_trait]
    impl SessionCheck for GatedCheck {
        async fn check(&self) -> Result<bool, ApiError> {
            let gate = self.gates.lock().await.pop_front().expect("no gate left");
            gate.await.expect("gate sender dropped")
        }
    }

    fn guard_with(check: impl SessionCheck + 'static) -> NavigationGuard {
        NavigationGuard::new(Arc::new(check), RouteTable::default())
    }

    #[tokio::test]
    async fn test_signed_in_user_bounced_off_auth_pages() {
        let guard = guard_with(StaticCheck(true));
        assert_eq!(
            guard.resolve("/login").await,
            GuardOutcome::Redirect("/".to_string())
        );
        assert_eq!(
            guard.resolve("/register").await,
            GuardOutcome::Redirect("/".to_string())
        );
        assert_eq!(
            guard.resolve("/login?redirect=/dashboard").await,
            GuardOutcome::Redirect("/".to_string())
        );
    }

    #[tokio::test]
    async fn test_signed_in_user_proceeds_elsewhere() {
        let guard = guard_with(StaticCheck(true));
        assert_eq!(guard.resolve("/").await, GuardOutcome::Proceed);
        assert_eq!(guard.resolve("/dashboard").await, GuardOutcome::Proceed);
        assert_eq!(guard.resolve("/tasks/abc-123").await, GuardOutcome::Proceed);
    }

    #[tokio::test]
    async fn test_signed_out_user_pushed_to_login() {
        let guard = guard_with(StaticCheck(false));
        assert_eq!(
            guard.resolve("/dashboard").await,
            GuardOutcome::Redirect("/login".to_string())
        );
        assert_eq!(
            guard.resolve("/tasks/abc-123").await,
            GuardOutcome::Redirect("/login".to_string())
        );
    }

    #[tokio::test]
    async fn test_signed_out_user_proceeds_on_public_paths() {
        let guard = guard_with(StaticCheck(false));
        assert_eq!(guard.resolve("/").await, GuardOutcome::Proceed);
        assert_eq!(guard.resolve("/login").await, GuardOutcome::Proceed);
        assert_eq!(guard.resolve("/register").await, GuardOutcome::Proceed);
        // Unknown paths carry no auth requirement
        assert_eq!(guard.resolve("/about").await, GuardOutcome::Proceed);
    }

    #[tokio::test]
    async fn test_failed_check_redirects_to_login() {
        let guard = guard_with(FailingCheck);
        assert_eq!(
            guard.resolve("/dashboard").await,
            GuardOutcome::Redirect("/login".to_string())
        );
        // Even a public target fails closed
        assert_eq!(
            guard.resolve("/").await,
            GuardOutcome::Redirect("/login".to_string())
        );
    }

    #[tokio::test]
    async fn test_sequential_navigations_both_act() {
        let guard = guard_with(StaticCheck(true));
        assert_eq!(guard.resolve("/dashboard").await, GuardOutcome::Proceed);
        assert_eq!(guard.resolve("/tasks").await, GuardOutcome::Proceed);
    }

    #[tokio::test]
    async fn test_latest_navigation_wins() {
        let (check, mut gates) = gated(2);
        let guard = NavigationGuard::new(Arc::new(check), RouteTable::default());

        let mut stale = Box::pin(guard.resolve("/dashboard"));
        let mut newest = Box::pin(guard.resolve("/"));

        // First poll starts each transition and parks it on its gate;
        // polling order fixes which one is older
        assert!(futures::poll!(stale.as_mut()).is_pending());
        assert!(futures::poll!(newest.as_mut()).is_pending());

        // The newer transition finishes first and acts normally
        gates.remove(1).send(Ok(true)).unwrap();
        assert_eq!(newest.await, GuardOutcome::Proceed);

        // The older one would have redirected to login, but it is stale now
        gates.remove(0).send(Ok(false)).unwrap();
        assert_eq!(stale.await, GuardOutcome::Superseded);
    }
}

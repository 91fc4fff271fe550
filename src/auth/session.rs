//! Shared session state.
//!
//! One `Session` record per process: the current user plus the loading and
//! error flags the auth operations maintain. The record lives behind
//! `SessionHandle`, a cheaply cloned reference; the auth manager is the
//! single writer, everyone else takes snapshots. The loading flag is held
//! through a guard so it releases even when an operation future is dropped
//! mid-await.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::User;

/// Current authentication state, as a UI shell sees it.
///
/// `user` is set exactly while the last authentication-affecting operation
/// succeeded; a failed session check or a logout clears it again.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct SessionRecord {
    user: Option<User>,
    error: Option<String>,
}

/// Marks an operation in flight. Dropping it clears the loading flag,
/// including when the owning operation future is cancelled mid-await.
#[must_use]
pub(crate) struct LoadingGuard {
    loading: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.loading.store(false, Ordering::SeqCst);
    }
}

/// Shared handle to the session record.
///
/// Mutators are crate-private: every state change flows through the auth
/// operations, which keeps the record consistent with the token store.
#[derive(Clone, Default)]
pub struct SessionHandle {
    record: Arc<RwLock<SessionRecord>>,
    loading: Arc<AtomicBool>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> Session {
        let record = self.record.read().await;
        Session {
            user: record.user.clone(),
            loading: self.is_loading(),
            error: record.error.clone(),
        }
    }

    pub async fn user(&self) -> Option<User> {
        self.record.read().await.user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn error(&self) -> Option<String> {
        self.record.read().await.error.clone()
    }

    /// Mark an operation as started: loading on, previous error cleared.
    /// The returned guard switches loading off again when dropped.
    pub(crate) async fn begin_op(&self) -> LoadingGuard {
        self.record.write().await.error = None;
        self.loading.store(true, Ordering::SeqCst);
        LoadingGuard {
            loading: Arc::clone(&self.loading),
        }
    }

    pub(crate) async fn set_error(&self, message: String) {
        self.record.write().await.error = Some(message);
    }

    pub(crate) async fn set_user(&self, user: User) {
        self.record.write().await.user = Some(user);
    }

    pub(crate) async fn clear_user(&self) {
        self.record.write().await.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let session = SessionHandle::new();
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.user, None);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn test_begin_op_clears_previous_error() {
        let session = SessionHandle::new();
        session.set_error("old failure".to_string()).await;

        let guard = session.begin_op().await;
        assert!(session.is_loading());
        assert!(session.snapshot().await.loading);
        assert_eq!(session.error().await, None);

        drop(guard);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_user_set_and_clear() {
        let session = SessionHandle::new();
        session.set_user(User::new("Ada")).await;
        assert_eq!(session.user().await.unwrap().name, "Ada");

        session.clear_user().await;
        assert_eq!(session.user().await, None);
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        let session = SessionHandle::new();
        let before = session.snapshot().await;

        session.set_user(User::new("Ada")).await;
        assert_eq!(before.user, None);
        assert_eq!(session.snapshot().await.user.unwrap().name, "Ada");
    }
}

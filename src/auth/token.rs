//! Persisted auth token with cookie-style expiry.
//!
//! The web client keeps its bearer token in an `auth_token` cookie with a
//! seven day lifetime; this store is the native equivalent, a JSON file in
//! the state directory holding the value plus its expiry instant. Expiry is
//! enforced on read: an expired entry is deleted lazily and reported as
//! absent.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Key the credential is stored under, mirroring the web client's cookie name
const TOKEN_KEY: &str = "auth_token";

/// Days a freshly stored token stays valid, matching the cookie TTL
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl StoredToken {
    fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

pub struct TokenStore {
    state_dir: PathBuf,
}

impl TokenStore {
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }

    /// Persist a token valid for `ttl_days` from now
    pub fn set(&self, token: &str, ttl_days: i64) -> Result<()> {
        let stored = StoredToken {
            value: token.to_string(),
            expires_at: Utc::now() + Duration::days(ttl_days),
        };

        let path = self.token_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create state directory")?;
        }
        let contents = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&path, contents).context("Failed to write token file")?;
        Ok(())
    }

    /// The stored token, or None when it is missing or expired.
    ///
    /// Read problems degrade to None: an unreadable token is treated the same
    /// as an absent one. An expired entry is deleted on the way out.
    pub fn get(&self) -> Option<String> {
        let path = self.token_path();
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to read token file");
                return None;
            }
        };
        let stored: StoredToken = match serde_json::from_str(&contents) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to parse token file");
                return None;
            }
        };

        if stored.is_expired() {
            debug!("Stored token expired, discarding");
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(error = %e, "Failed to delete expired token file");
            }
            return None;
        }

        Some(stored.value)
    }

    /// Delete the stored token. Removing an absent token is a no-op.
    pub fn remove(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to delete token file")?;
        }
        Ok(())
    }

    fn token_path(&self) -> PathBuf {
        self.state_dir.join(format!("{}.json", TOKEN_KEY))
    }
}

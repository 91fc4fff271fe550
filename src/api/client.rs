//! Request wrapper for the Taskdeck REST API.
//!
//! This module provides the `ApiClient` struct plus the per-call
//! `RequestOptions` that decide whether a request carries the bearer token
//! and whether a successful response triggers a navigation.

use std::sync::Arc;

use anyhow::Result;
use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::config::ClientConfig;
use crate::router::Navigator;

use super::ApiError;

/// Per-call options for the request wrapper.
///
/// `with_auth` opts the call into bearer decoration; nothing is attached
/// globally, the token is read from the store again on every decorated call.
/// `redirect_to` asks the wired `Navigator` to push a path once the call
/// succeeds, the way the web client lands on a listing page after a form
/// submission.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub with_auth: bool,
    pub redirect_to: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the bearer stage enabled
    pub fn authenticated() -> Self {
        Self {
            with_auth: true,
            ..Self::default()
        }
    }

    pub fn with_redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = Some(path.into());
        self
    }
}

/// API client for the Taskdeck backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<TokenStore>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClient {
    /// Create a new API client against the configured base URL
    pub fn new(config: &ClientConfig, tokens: Arc<TokenStore>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            tokens,
            navigator: None,
        })
    }

    /// Wire the navigator used for `redirect_to` handling
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>, opts).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(body), opts).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, Some(body), opts).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::PATCH, path, Some(body), opts).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None::<&()>, opts).await
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        opts: &RequestOptions,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(method = %method, path, with_auth = opts.with_auth, "Sending request");

        let mut builder = self.client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if opts.with_auth {
            // Re-read on every call so a token removed or expired mid-session
            // stops being attached immediately
            if let Some(token) = self.tokens.get() {
                builder = builder.bearer_auth(token);
            }
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, path, "Request rejected");
            return Err(ApiError::from_status(status, &body));
        }

        let text = response.text().await?;
        let parsed = if text.is_empty() {
            // Some endpoints (logout among them) reply 2xx with no body
            serde_json::from_str("null")
        } else {
            serde_json::from_str(&text)
        };
        let value = parsed.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e))
        })?;

        if let Some(ref target) = opts.redirect_to {
            self.redirect(target);
        }

        Ok(value)
    }

    fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn redirect(&self, path: &str) {
        match self.navigator {
            Some(ref navigator) => {
                debug!(path, "Redirecting after successful request");
                navigator.push(path);
            }
            None => debug!(path, "No navigator wired, skipping redirect"),
        }
    }
}

/// Join the base URL and an endpoint path without doubling or dropping the
/// separating slash
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

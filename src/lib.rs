//! Taskdeck - the client core of a task management web application.
//!
//! This crate provides the pieces a UI shell (TUI, desktop, or WASM) needs to
//! talk to the Taskdeck backend:
//!
//! - `ApiClient`: a thin request wrapper over the REST API with per-call
//!   bearer authentication and optional redirect-on-success
//! - `TokenStore`: the persisted `auth_token` credential with cookie-style
//!   seven day expiry
//! - `SessionHandle`: shared session state (current user, loading, error)
//! - `AuthManager`: login, register, logout, and the session check
//! - `NavigationGuard`: gates route transitions behind the session check
//!
//! `TaskdeckClient` wires all of the above together from a `ClientConfig`.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod logging;
pub mod models;
pub mod router;

pub use api::{ApiClient, ApiError, RequestOptions};
pub use auth::{AuthManager, Session, SessionHandle, TokenStore};
pub use client::TaskdeckClient;
pub use config::ClientConfig;
pub use models::{Task, TaskPriority, TaskStatus, User};
pub use router::{GuardOutcome, NavigationGuard, Navigator, Route, RouteTable, SessionCheck};

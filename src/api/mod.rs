//! REST API client module for the Taskdeck backend.
//!
//! This module provides the `ApiClient` request wrapper, the typed
//! authentication and task endpoints built on top of it, and the `ApiError`
//! taxonomy every remote call reports through.
//!
//! Authentication uses bearer tokens issued by `POST /login`; calls opt into
//! decoration per request via `RequestOptions`.

pub mod auth;
pub mod client;
pub mod error;
pub mod tasks;

pub use auth::{AuthApi, AuthPayload, LoginRequest, RegisterRequest};
pub use client::{ApiClient, RequestOptions};
pub use error::ApiError;
pub use tasks::{NewTask, TaskUpdate};

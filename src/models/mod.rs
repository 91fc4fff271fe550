//! Data models for Taskdeck entities.
//!
//! This module contains the data structures shared between the API layer and
//! embedding shells:
//!
//! - `User`: the authenticated account, as served by `GET /user`
//! - `Task`, `TaskStatus`, `TaskPriority`: task records plus the display
//!   attributes the web UI derives from status and priority

pub mod task;
pub mod user;

pub use task::{Task, TaskPriority, TaskStatus};
pub use user::User;

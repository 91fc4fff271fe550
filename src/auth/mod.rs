//! Authentication module for managing the user session and its token.
//!
//! This module provides:
//! - `TokenStore`: the persisted `auth_token` credential with a seven day
//!   cookie-style expiry
//! - `Session` / `SessionHandle`: shared current-user state with loading and
//!   error flags
//! - `AuthManager`: the login, register, logout, and check operations that
//!   keep the two consistent

pub mod manager;
pub mod session;
pub mod token;

pub use manager::AuthManager;
pub use session::{Session, SessionHandle};
pub use token::{TokenStore, DEFAULT_TOKEN_TTL_DAYS};

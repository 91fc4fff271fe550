//! Authentication endpoints and their wire types.
//!
//! `AuthApi` is the seam between the auth controller and the transport.
//! `ApiClient` implements it against the real backend; tests substitute
//! in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::User;

use super::{ApiClient, ApiError, RequestOptions};

/// Credentials for `POST /login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

/// Signup form for `POST /register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// What `POST /login` and `POST /register` hand back on success
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// The backend's authentication surface.
///
/// `login`, `register`, and `logout` go out undecorated; only `fetch_user`
/// carries the bearer token.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
    async fn fetch_user(&self) -> Result<User, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        self.post("/login", request, &RequestOptions::new()).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        self.post("/register", request, &RequestOptions::new()).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post("/logout", &serde_json::json!({}), &RequestOptions::new())
            .await?;
        Ok(())
    }

    async fn fetch_user(&self) -> Result<User, ApiError> {
        self.get("/user", &RequestOptions::authenticated()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_shape() {
        let request = LoginRequest {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            remember: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["password"], "hunter2");
        assert_eq!(json["remember"], true);
    }

    #[test]
    fn test_register_request_wire_shape() {
        let request = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            password_confirmation: "hunter2".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["password_confirmation"], "hunter2");
        // No remember flag on registration
        assert!(json.get("remember").is_none());
    }

    #[test]
    fn test_parse_auth_payload() {
        let json = r#"{
            "token": "1|aBcDeF123",
            "user": {"name": "Ada", "email": "ada@example.com", "id": 7}
        }"#;
        let payload: AuthPayload = serde_json::from_str(json).expect("Failed to parse payload");
        assert_eq!(payload.token, "1|aBcDeF123");
        assert_eq!(payload.user.name, "Ada");
        assert_eq!(payload.user.extra["id"], 7);
    }
}

/*
 * Responsibility
 * - /auth (register / login / me) の DTO
 */
use serde::{Deserialize, Serialize};

use super::users::{UserResponse, validate_email, validate_password, validate_username};

// no Debug: carries a plaintext password
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_username(&self.username)?;
        validate_password(&self.password)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("username is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username": "alice", "password": ""}"#).unwrap();
        assert_eq!(req.validate(), Err("password is required"));
    }

    #[test]
    fn login_debug_hides_password() {
        let req = LoginRequest {
            username: "alice".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(!format!("{req:?}").contains("hunter22"));
    }

    #[test]
    fn register_validates_like_user_creation() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username": "bob", "password": "12345678"}"#).unwrap();
        assert!(req.validate().is_ok());

        let req: RegisterRequest =
            serde_json::from_str(r#"{"username": "bob", "password": "1234"}"#).unwrap();
        assert!(req.validate().is_err());
    }
}

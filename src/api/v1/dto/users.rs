/*
 * Responsibility
 * - Users の request/response DTO
 * - password_hash はレスポンスに含めない
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_max, check_required, nullable};
use crate::services::auth::{RoleId, roles};

pub const USERNAME_MAX_CHARS: usize = 50;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 128;

pub(crate) fn validate_username(username: &str) -> Result<(), &'static str> {
    check_required(
        username,
        USERNAME_MAX_CHARS,
        "username is required",
        "username must be <= 50 chars",
    )?;
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err("username may only contain letters, digits, '_', '-' and '.'");
    }
    Ok(())
}

pub(crate) fn validate_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_CHARS {
        return Err("password must be >= 8 chars");
    }
    if len > PASSWORD_MAX_CHARS {
        return Err("password must be <= 128 chars");
    }
    Ok(())
}

pub(crate) fn validate_email(email: &str) -> Result<(), &'static str> {
    check_max(email, EMAIL_MAX_CHARS, "email must be <= 254 chars")?;
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err("email is invalid"),
    }
}

fn validate_role(role_id: RoleId) -> Result<(), &'static str> {
    if roles::is_known(role_id) {
        Ok(())
    } else {
        Err("role_id is invalid")
    }
}

// no Debug: carries a plaintext password
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub role_id: Option<RoleId>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_username(&self.username)?;
        validate_password(&self.password)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(role_id) = self.role_id {
            validate_role(role_id)?;
        }
        Ok(())
    }

    pub fn role_id(&self) -> RoleId {
        self.role_id.unwrap_or(roles::USER)
    }
}

// no Debug: carries a plaintext password
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    pub password: Option<String>,
    pub role_id: Option<RoleId>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        if let Some(Some(email)) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        if let Some(role_id) = self.role_id {
            validate_role(role_id)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String, // encoded
    pub username: String,
    pub email: Option<String>,
    pub role_id: RoleId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

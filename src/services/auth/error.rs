use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failure outcome of token verification or role authorization.
///
/// Authentication failures map to 401, role failures to 403 and a missing
/// signing secret to 500. The `Display` text is what the client sees, so
/// variants never carry internal error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authorization header missing")]
    MissingHeader,
    #[error("authorization header must use the Bearer scheme")]
    InvalidScheme,
    #[error("bearer token missing")]
    EmptyToken,
    #[error("token expired")]
    Expired,
    #[error("token invalid")]
    InvalidToken,
    #[error("authorization failed")]
    Failed,
    #[error("insufficient permission")]
    Forbidden,
    #[error("authentication is not configured")]
    MissingSecret,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::MissingSecret => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::MissingHeader
            | AuthError::InvalidScheme
            | AuthError::EmptyToken
            | AuthError::Expired
            | AuthError::InvalidToken
            | AuthError::Failed => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

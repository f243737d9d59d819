/*
 * Responsibility
 * - POST /auth/register: role=user で登録
 * - POST /auth/login: username/password 照合 → HS256 token 発行
 * - GET /auth/me: token の主体を DB から引き直して返す
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::{
            auth::{LoginRequest, LoginResponse, RegisterRequest},
            users::UserResponse,
        },
        extractors::{AnyRoleCtx, ApiJson},
        handlers::users::{map_user_write_error, row_to_response},
    },
    error::AppError,
    repos::user_repo::{self, NewUser, UserRow},
    services::{
        auth::{Identity, roles},
        password,
    },
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let password_hash = password::hash_password_blocking(req.password).await?;
    let row = user_repo::create(
        &state.db,
        NewUser {
            username: req.username.trim(),
            email: req.email.as_deref(),
            password_hash: &password_hash,
            role_id: roles::USER,
        },
    )
    .await
    .map_err(map_user_write_error)?;

    tracing::info!(user_id = row.id, "user registered");

    Ok((StatusCode::CREATED, Json(row_to_response(&state, row)?)))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    // Unknown user and wrong password answer identically
    let creds = user_repo::find_credentials_by_username(&state.db, req.username.trim()).await?;
    let Some(creds) = creds else {
        // Same Argon2 cost as a password mismatch
        if let Err(e) = password::verify_dummy_blocking(req.password).await {
            tracing::warn!(error = %e, "dummy password verification failed");
        }
        tracing::debug!("login failed: unknown username");
        return Err(AppError::Unauthorized);
    };

    if !password::verify_password_blocking(req.password, creds.password_hash).await? {
        tracing::debug!(user_id = creds.id, "login failed: password mismatch");
        return Err(AppError::Unauthorized);
    }

    let identity = Identity {
        id: creds.id,
        username: creds.username,
        role_id: creds.role_id,
        email: creds.email,
    };
    let issued = state.auth.issue(&identity)?;

    let user = row_to_response(
        &state,
        UserRow {
            id: identity.id,
            username: identity.username,
            email: identity.email,
            role_id: identity.role_id,
            created_at: creds.created_at,
            updated_at: creds.updated_at,
        },
    )?;

    tracing::info!(user_id = identity.id, "login succeeded");

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
        user,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    auth: AnyRoleCtx,
) -> Result<Json<UserResponse>, AppError> {
    let row = user_repo::get(&state.db, auth.user_id())
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(row_to_response(&state, row)?))
}

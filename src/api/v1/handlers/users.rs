/*
 * Responsibility
 * - /users 系 CRUD handler (admin 以上)
 * - role を user 以外にする作成・role の変更は superadmin のみ
 * - superadmin アカウント自体の変更・削除も superadmin のみ
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::{
            pagination::ListQuery,
            users::{CreateUserRequest, UpdateUserRequest, UserResponse},
        },
        extractors::{AdminCtx, ApiJson, ApiQuery, SuperAdminCtx, public_id::PublicUserId},
    },
    error::AppError,
    repos::{
        error::RepoError,
        user_repo::{self, NewUser, UserChanges, UserRow},
    },
    services::{
        auth::{Identity, roles},
        password,
    },
    state::AppState,
};

pub(crate) fn row_to_response(state: &AppState, row: UserRow) -> Result<UserResponse, AppError> {
    Ok(UserResponse {
        id: state.id_codec.encode(row.id)?,
        username: row.username,
        email: row.email,
        role_id: row.role_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub(crate) fn map_user_write_error(e: RepoError) -> AppError {
    match e {
        RepoError::Conflict => AppError::conflict("username or email already taken"),
        other => other.into(),
    }
}

fn ensure_may_manage(caller: &Identity, target_role: roles::RoleId) -> Result<(), AppError> {
    if roles::is_superadmin(target_role) && !roles::is_superadmin(caller.role_id) {
        tracing::warn!(caller_id = caller.id, "non-superadmin tried to manage a superadmin");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub async fn list_users(
    State(state): State<AppState>,
    _auth: AdminCtx,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let page = query.page();
    let rows = user_repo::list(&state.db, page.limit, page.offset).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_user(
    State(state): State<AppState>,
    auth: AdminCtx,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let role_id = req.role_id();
    if role_id != roles::USER {
        let _: SuperAdminCtx = auth.narrow()?;
    }

    let password_hash = password::hash_password_blocking(req.password).await?;
    let row = user_repo::create(
        &state.db,
        NewUser {
            username: req.username.trim(),
            email: req.email.as_deref(),
            password_hash: &password_hash,
            role_id,
        },
    )
    .await
    .map_err(map_user_write_error)?;

    tracing::info!(user_id = row.id, role_id, created_by = auth.user_id(), "user created");

    Ok((StatusCode::CREATED, Json(row_to_response(&state, row)?)))
}

pub async fn get_user(
    State(state): State<AppState>,
    _auth: AdminCtx,
    user_id: PublicUserId,
) -> Result<Json<UserResponse>, AppError> {
    let row = user_repo::get(&state.db, user_id.id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_user(
    State(state): State<AppState>,
    auth: AdminCtx,
    user_id: PublicUserId,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    if req.role_id.is_some() {
        let _: SuperAdminCtx = auth.narrow()?;
    }

    let current = user_repo::get(&state.db, user_id.id)
        .await?
        .ok_or(AppError::not_found("user"))?;
    ensure_may_manage(&auth.identity, current.role_id)?;

    let password_hash = match req.password {
        Some(pw) => Some(password::hash_password_blocking(pw).await?),
        None => None,
    };

    // email tri-state:
    // - None: do not update
    // - Some(None): set NULL
    // - Some(Some(v)): set v
    let changes = UserChanges {
        username: req.username.as_deref().map(str::trim),
        email: req.email.as_ref().map(|inner| inner.as_deref()),
        password_hash: password_hash.as_deref(),
        role_id: req.role_id,
    };

    let row = user_repo::update(&state.db, user_id.id, changes)
        .await
        .map_err(map_user_write_error)?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth: AdminCtx,
    user_id: PublicUserId,
) -> Result<StatusCode, AppError> {
    let current = user_repo::get(&state.db, user_id.id)
        .await?
        .ok_or(AppError::not_found("user"))?;
    ensure_may_manage(&auth.identity, current.role_id)?;

    let deleted = user_repo::delete(&state.db, user_id.id)
        .await
        .map_err(AppError::from_delete)?;

    if deleted {
        tracing::info!(user_id = user_id.id, deleted_by = auth.user_id(), "user deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role_id: roles::RoleId) -> Identity {
        Identity {
            id: 10,
            username: "caller".to_string(),
            role_id,
            email: None,
        }
    }

    #[test]
    fn admin_may_not_manage_a_superadmin() {
        let err = ensure_may_manage(&caller(roles::ADMIN), roles::SUPERADMIN).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn superadmin_may_manage_a_superadmin() {
        assert!(ensure_may_manage(&caller(roles::SUPERADMIN), roles::SUPERADMIN).is_ok());
    }

    #[test]
    fn admin_may_manage_lower_roles() {
        assert!(ensure_may_manage(&caller(roles::ADMIN), roles::ADMIN).is_ok());
        assert!(ensure_may_manage(&caller(roles::ADMIN), roles::USER).is_ok());
    }
}

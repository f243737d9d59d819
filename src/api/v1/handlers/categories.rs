/*
 * Responsibility
 * - /business-categories 系 CRUD handler
 * - 参照系は public、書き込みは admin 以上
 * - subsectors から参照されている category の削除は 409
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::{
            categories::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
            pagination::ListQuery,
        },
        extractors::{AdminCtx, ApiJson, ApiQuery, public_id::PublicCategoryId},
    },
    error::AppError,
    repos::{
        category_repo::{self, CategoryRow},
        error::RepoError,
    },
    state::AppState,
};

fn row_to_response(state: &AppState, row: CategoryRow) -> Result<CategoryResponse, AppError> {
    Ok(CategoryResponse {
        id: state.id_codec.encode(row.id)?,
        name: row.name,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn map_write_error(e: RepoError) -> AppError {
    match e {
        RepoError::Conflict => AppError::conflict("business category already exists"),
        other => other.into(),
    }
}

pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let page = query.page();
    let rows = category_repo::list(&state.db, page.limit, page.offset).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_category(
    State(state): State<AppState>,
    _auth: AdminCtx,
    ApiJson(req): ApiJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = category_repo::create(&state.db, req.name.trim(), req.description.as_deref())
        .await
        .map_err(map_write_error)?;

    Ok((StatusCode::CREATED, Json(row_to_response(&state, row)?)))
}

pub async fn get_category(
    State(state): State<AppState>,
    category_id: PublicCategoryId,
) -> Result<Json<CategoryResponse>, AppError> {
    let row = category_repo::get(&state.db, category_id.id)
        .await?
        .ok_or(AppError::not_found("business category"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_category(
    State(state): State<AppState>,
    _auth: AdminCtx,
    category_id: PublicCategoryId,
    ApiJson(req): ApiJson<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = category_repo::update(
        &state.db,
        category_id.id,
        req.name.as_deref().map(str::trim),
        req.description.as_ref().map(|inner| inner.as_deref()),
    )
    .await
    .map_err(map_write_error)?
    .ok_or(AppError::not_found("business category"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    _auth: AdminCtx,
    category_id: PublicCategoryId,
) -> Result<StatusCode, AppError> {
    let deleted = category_repo::delete(&state.db, category_id.id)
        .await
        .map_err(AppError::from_delete)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("business category"))
    }
}

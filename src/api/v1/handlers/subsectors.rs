/*
 * Responsibility
 * - /subsectors 系 CRUD handler
 * - ?business_category_id= (公開 ID) で絞り込み
 * - 存在しない category を指す作成/更新は FK 違反 → 400
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::subsectors::{
            CreateSubsectorRequest, SubsectorListQuery, SubsectorResponse,
            UpdateSubsectorRequest,
        },
        extractors::{
            AdminCtx, ApiJson, ApiQuery,
            public_id::{PublicSubsectorId, decode_public_id},
        },
    },
    error::AppError,
    repos::{
        error::RepoError,
        subsector_repo::{self, SubsectorRow},
    },
    state::AppState,
};

fn row_to_response(state: &AppState, row: SubsectorRow) -> Result<SubsectorResponse, AppError> {
    Ok(SubsectorResponse {
        id: state.id_codec.encode(row.id)?,
        business_category_id: state.id_codec.encode(row.business_category_id)?,
        name: row.name,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn map_write_error(e: RepoError) -> AppError {
    match e {
        RepoError::Conflict => {
            AppError::conflict("subsector already exists in this business category")
        }
        other => other.into(),
    }
}

pub async fn list_subsectors(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SubsectorListQuery>,
) -> Result<Json<Vec<SubsectorResponse>>, AppError> {
    let page = query.page();
    let category_id = query
        .business_category_id
        .as_deref()
        .map(|raw| decode_public_id(&state, raw))
        .transpose()?;

    let rows = subsector_repo::list(&state.db, page.limit, page.offset, category_id).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_subsector(
    State(state): State<AppState>,
    _auth: AdminCtx,
    ApiJson(req): ApiJson<CreateSubsectorRequest>,
) -> Result<(StatusCode, Json<SubsectorResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;
    let category_id = decode_public_id(&state, &req.business_category_id)?;

    let row = subsector_repo::create(
        &state.db,
        category_id,
        req.name.trim(),
        req.description.as_deref(),
    )
    .await
    .map_err(map_write_error)?;

    Ok((StatusCode::CREATED, Json(row_to_response(&state, row)?)))
}

pub async fn get_subsector(
    State(state): State<AppState>,
    subsector_id: PublicSubsectorId,
) -> Result<Json<SubsectorResponse>, AppError> {
    let row = subsector_repo::get(&state.db, subsector_id.id)
        .await?
        .ok_or(AppError::not_found("subsector"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_subsector(
    State(state): State<AppState>,
    _auth: AdminCtx,
    subsector_id: PublicSubsectorId,
    ApiJson(req): ApiJson<UpdateSubsectorRequest>,
) -> Result<Json<SubsectorResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;
    let category_id = req
        .business_category_id
        .as_deref()
        .map(|raw| decode_public_id(&state, raw))
        .transpose()?;

    let row = subsector_repo::update(
        &state.db,
        subsector_id.id,
        category_id,
        req.name.as_deref().map(str::trim),
        req.description.as_ref().map(|inner| inner.as_deref()),
    )
    .await
    .map_err(map_write_error)?
    .ok_or(AppError::not_found("subsector"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_subsector(
    State(state): State<AppState>,
    _auth: AdminCtx,
    subsector_id: PublicSubsectorId,
) -> Result<StatusCode, AppError> {
    let deleted = subsector_repo::delete(&state.db, subsector_id.id)
        .await
        .map_err(AppError::from_delete)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("subsector"))
    }
}

/*
 * Responsibility
 * - /articles 系 CRUD handler
 * - 参照系は public、書き込みは admin 以上 (作成者が author)
 * - Path の {article_id} は公開 ID → extractor で内部 ID に変換して受け取る
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::{
            articles::{ArticleResponse, CreateArticleRequest, UpdateArticleRequest},
            pagination::ListQuery,
        },
        extractors::{AdminCtx, ApiJson, ApiQuery, public_id::PublicArticleId},
    },
    error::AppError,
    repos::article_repo::{self, ArticleRow},
    state::AppState,
};

fn row_to_response(state: &AppState, row: ArticleRow) -> Result<ArticleResponse, AppError> {
    Ok(ArticleResponse {
        id: state.id_codec.encode(row.id)?,
        author_id: state.id_codec.encode(row.author_id)?,
        title: row.title,
        content: row.content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub async fn list_articles(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<ArticleResponse>>, AppError> {
    let page = query.page();
    let rows = article_repo::list(&state.db, page.limit, page.offset).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_article(
    State(state): State<AppState>,
    auth: AdminCtx,
    ApiJson(req): ApiJson<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ArticleResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = article_repo::create(&state.db, req.title.trim(), &req.content, auth.user_id())
        .await?;

    Ok((StatusCode::CREATED, Json(row_to_response(&state, row)?)))
}

pub async fn get_article(
    State(state): State<AppState>,
    article_id: PublicArticleId,
) -> Result<Json<ArticleResponse>, AppError> {
    let row = article_repo::get(&state.db, article_id.id)
        .await?
        .ok_or(AppError::not_found("article"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_article(
    State(state): State<AppState>,
    _auth: AdminCtx,
    article_id: PublicArticleId,
    ApiJson(req): ApiJson<UpdateArticleRequest>,
) -> Result<Json<ArticleResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = article_repo::update(
        &state.db,
        article_id.id,
        req.title.as_deref().map(str::trim),
        req.content.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("article"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_article(
    State(state): State<AppState>,
    _auth: AdminCtx,
    article_id: PublicArticleId,
) -> Result<StatusCode, AppError> {
    let deleted = article_repo::delete(&state.db, article_id.id)
        .await
        .map_err(AppError::from_delete)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("article"))
    }
}

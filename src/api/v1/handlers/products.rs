/*
 * Responsibility
 * - /products 系 CRUD handler
 * - 作成は認証済みなら誰でも (作成者が owner)
 * - 更新/削除は owner か admin 以上、それ以外は 403
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::products::{
            CreateProductRequest, ProductListQuery, ProductResponse, UpdateProductRequest,
        },
        extractors::{
            AnyRoleCtx, ApiJson, ApiQuery,
            public_id::{PublicProductId, decode_public_id},
        },
    },
    error::AppError,
    repos::product_repo::{self, NewProduct, ProductChanges, ProductRow},
    services::auth::{Identity, roles},
    state::AppState,
};

fn row_to_response(state: &AppState, row: ProductRow) -> Result<ProductResponse, AppError> {
    Ok(ProductResponse {
        id: state.id_codec.encode(row.id)?,
        subsector_id: state.id_codec.encode(row.subsector_id)?,
        owner_id: state.id_codec.encode(row.owner_id)?,
        name: row.name,
        description: row.description,
        price: row.price,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn may_modify(caller: &Identity, product: &ProductRow) -> bool {
    product.owner_id == caller.id || roles::is_admin(caller.role_id)
}

/// Loads the product and checks that the caller owns it or is an admin.
async fn load_owned(
    state: &AppState,
    caller: &Identity,
    product_id: i64,
) -> Result<ProductRow, AppError> {
    let row = product_repo::get(&state.db, product_id)
        .await?
        .ok_or(AppError::not_found("product"))?;

    if !may_modify(caller, &row) {
        tracing::warn!(product_id, caller_id = caller.id, "product ownership check failed");
        return Err(AppError::Forbidden);
    }

    Ok(row)
}

pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductListQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let page = query.page();
    let subsector_id = query
        .subsector_id
        .as_deref()
        .map(|raw| decode_public_id(&state, raw))
        .transpose()?;

    let rows = product_repo::list(&state.db, page.limit, page.offset, subsector_id).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_product(
    State(state): State<AppState>,
    auth: AnyRoleCtx,
    ApiJson(req): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;
    let subsector_id = decode_public_id(&state, &req.subsector_id)?;

    let row = product_repo::create(
        &state.db,
        NewProduct {
            subsector_id,
            owner_id: auth.user_id(),
            name: req.name.trim(),
            description: req.description.as_deref(),
            price: req.price,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row_to_response(&state, row)?)))
}

pub async fn get_product(
    State(state): State<AppState>,
    product_id: PublicProductId,
) -> Result<Json<ProductResponse>, AppError> {
    let row = product_repo::get(&state.db, product_id.id)
        .await?
        .ok_or(AppError::not_found("product"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_product(
    State(state): State<AppState>,
    auth: AnyRoleCtx,
    product_id: PublicProductId,
    ApiJson(req): ApiJson<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;
    let subsector_id = req
        .subsector_id
        .as_deref()
        .map(|raw| decode_public_id(&state, raw))
        .transpose()?;

    load_owned(&state, &auth.identity, product_id.id).await?;

    let changes = ProductChanges {
        subsector_id,
        name: req.name.as_deref().map(str::trim),
        description: req.description.as_ref().map(|inner| inner.as_deref()),
        price: req.price,
    };

    let row = product_repo::update(&state.db, product_id.id, changes)
        .await?
        .ok_or(AppError::not_found("product"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    auth: AnyRoleCtx,
    product_id: PublicProductId,
) -> Result<StatusCode, AppError> {
    load_owned(&state, &auth.identity, product_id.id).await?;

    let deleted = product_repo::delete(&state.db, product_id.id)
        .await
        .map_err(AppError::from_delete)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("product"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(owner_id: i64) -> ProductRow {
        ProductRow {
            id: 1,
            subsector_id: 1,
            owner_id,
            name: "Bread".to_string(),
            description: None,
            price: 300,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn caller(id: i64, role_id: roles::RoleId) -> Identity {
        Identity {
            id,
            username: format!("user{id}"),
            role_id,
            email: None,
        }
    }

    #[test]
    fn owner_may_modify() {
        assert!(may_modify(&caller(7, roles::USER), &product(7)));
    }

    #[test]
    fn other_users_may_not_modify() {
        assert!(!may_modify(&caller(8, roles::USER), &product(7)));
    }

    #[test]
    fn admins_may_modify_any_product() {
        assert!(may_modify(&caller(1, roles::ADMIN), &product(7)));
        assert!(may_modify(&caller(2, roles::SUPERADMIN), &product(7)));
    }
}

/*
 * Responsibility
 * - products CRUD
 * - owner_id は users(id) ON DELETE CASCADE、subsector_id は RESTRICT
 * - price は最小通貨単位の整数 (CHECK price >= 0)
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub subsector_id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewProduct<'a> {
    pub subsector_id: i64,
    pub owner_id: i64,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: i64,
}

#[derive(Default)]
pub struct ProductChanges<'a> {
    pub subsector_id: Option<i64>,
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub price: Option<i64>,
}

pub async fn list(
    db: &PgPool,
    limit: i64,
    offset: i64,
    subsector_id: Option<i64>,
) -> RepoResult<Vec<ProductRow>> {
    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT
            id, subsector_id, owner_id, name, description, price, created_at, updated_at
        FROM products
        WHERE ($3::BIGINT IS NULL OR subsector_id = $3)
        ORDER BY id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .bind(subsector_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, new: NewProduct<'_>) -> RepoResult<ProductRow> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        INSERT INTO products (subsector_id, owner_id, name, description, price)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING
            id, subsector_id, owner_id, name, description, price, created_at, updated_at
        "#,
    )
    .bind(new.subsector_id)
    .bind(new.owner_id)
    .bind(new.name)
    .bind(new.description)
    .bind(new.price)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, product_id: i64) -> RepoResult<Option<ProductRow>> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT
            id, subsector_id, owner_id, name, description, price, created_at, updated_at
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(product_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    product_id: i64,
    changes: ProductChanges<'_>,
) -> RepoResult<Option<ProductRow>> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        UPDATE products
        SET
            subsector_id = COALESCE($2, subsector_id),
            name = COALESCE($3, name),
            description = CASE
                WHEN $4 = false THEN description
                ELSE $5
            END,
            price = COALESCE($6, price),
            updated_at = now()
        WHERE id = $1
        RETURNING
            id, subsector_id, owner_id, name, description, price, created_at, updated_at
        "#,
    )
    .bind(product_id)
    .bind(changes.subsector_id)
    .bind(changes.name)
    .bind(changes.description.is_some())
    .bind(changes.description.flatten())
    .bind(changes.price)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, product_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM products
        WHERE id = $1
        "#,
    )
    .bind(product_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

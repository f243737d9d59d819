/*
 * Responsibility
 * - business_categories CRUD
 * - subsectors から RESTRICT で参照されるため、削除は ForeignKey になり得る
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> RepoResult<Vec<CategoryRow>> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM business_categories
        ORDER BY name ASC, id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    description: Option<&str>,
) -> RepoResult<CategoryRow> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"
        INSERT INTO business_categories (name, description)
        VALUES ($1, $2)
        RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(description)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, category_id: i64) -> RepoResult<Option<CategoryRow>> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM business_categories
        WHERE id = $1
        "#,
    )
    .bind(category_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    category_id: i64,
    name: Option<&str>,
    description: Option<Option<&str>>,
) -> RepoResult<Option<CategoryRow>> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"
        UPDATE business_categories
        SET
            name = COALESCE($2, name),
            description = CASE
                WHEN $3 = false THEN description
                ELSE $4
            END,
            updated_at = now()
        WHERE id = $1
        RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(category_id)
    .bind(name)
    .bind(description.is_some())
    .bind(description.flatten())
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, category_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM business_categories
        WHERE id = $1
        "#,
    )
    .bind(category_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

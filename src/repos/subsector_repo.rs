/*
 * Responsibility
 * - subsectors CRUD
 * - business_category_id の FK 違反 / products からの参照は RepoError で上位へ
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct SubsectorRow {
    pub id: i64,
    pub business_category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `category_id = None` lists every subsector.
pub async fn list(
    db: &PgPool,
    limit: i64,
    offset: i64,
    category_id: Option<i64>,
) -> RepoResult<Vec<SubsectorRow>> {
    let rows = sqlx::query_as::<_, SubsectorRow>(
        r#"
        SELECT id, business_category_id, name, description, created_at, updated_at
        FROM subsectors
        WHERE ($3::BIGINT IS NULL OR business_category_id = $3)
        ORDER BY name ASC, id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .bind(category_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    category_id: i64,
    name: &str,
    description: Option<&str>,
) -> RepoResult<SubsectorRow> {
    let row = sqlx::query_as::<_, SubsectorRow>(
        r#"
        INSERT INTO subsectors (business_category_id, name, description)
        VALUES ($1, $2, $3)
        RETURNING id, business_category_id, name, description, created_at, updated_at
        "#,
    )
    .bind(category_id)
    .bind(name)
    .bind(description)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, subsector_id: i64) -> RepoResult<Option<SubsectorRow>> {
    let row = sqlx::query_as::<_, SubsectorRow>(
        r#"
        SELECT id, business_category_id, name, description, created_at, updated_at
        FROM subsectors
        WHERE id = $1
        "#,
    )
    .bind(subsector_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    subsector_id: i64,
    category_id: Option<i64>,
    name: Option<&str>,
    description: Option<Option<&str>>,
) -> RepoResult<Option<SubsectorRow>> {
    let row = sqlx::query_as::<_, SubsectorRow>(
        r#"
        UPDATE subsectors
        SET
            business_category_id = COALESCE($2, business_category_id),
            name = COALESCE($3, name),
            description = CASE
                WHEN $4 = false THEN description
                ELSE $5
            END,
            updated_at = now()
        WHERE id = $1
        RETURNING id, business_category_id, name, description, created_at, updated_at
        "#,
    )
    .bind(subsector_id)
    .bind(category_id)
    .bind(name)
    .bind(description.is_some())
    .bind(description.flatten())
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, subsector_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM subsectors
        WHERE id = $1
        "#,
    )
    .bind(subsector_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

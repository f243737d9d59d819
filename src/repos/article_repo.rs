/*
 * Responsibility
 * - articles CRUD
 * - author_id の FK (CASCADE) 前提で削除挙動を意識
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> RepoResult<Vec<ArticleRow>> {
    let rows = sqlx::query_as::<_, ArticleRow>(
        r#"
        SELECT id, author_id, title, content, created_at, updated_at
        FROM articles
        ORDER BY id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn create(
    pool: &PgPool,
    title: &str,
    content: &str,
    author_id: i64,
) -> RepoResult<ArticleRow> {
    let row = sqlx::query_as::<_, ArticleRow>(
        r#"
        INSERT INTO articles (title, content, author_id)
        VALUES ($1, $2, $3)
        RETURNING id, author_id, title, content, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get(pool: &PgPool, article_id: i64) -> RepoResult<Option<ArticleRow>> {
    let row = sqlx::query_as::<_, ArticleRow>(
        r#"
        SELECT id, author_id, title, content, created_at, updated_at
        FROM articles
        WHERE id = $1
        "#,
    )
    .bind(article_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    article_id: i64,
    title: Option<&str>,
    content: Option<&str>,
) -> RepoResult<Option<ArticleRow>> {
    let row = sqlx::query_as::<_, ArticleRow>(
        r#"
        UPDATE articles
        SET
            title = COALESCE($2, title),
            content = COALESCE($3, content),
            updated_at = now()
        WHERE id = $1
        RETURNING id, author_id, title, content, created_at, updated_at
        "#,
    )
    .bind(article_id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, article_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM articles
        WHERE id = $1
        "#,
    )
    .bind(article_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/*
 * Responsibility
 * - Articles の request/response DTO
 * - author_id は公開 ID (encode 済み) で返す
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::check_required;

pub const TITLE_MAX_CHARS: usize = 200;
pub const CONTENT_MAX_CHARS: usize = 50_000;

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
}

impl CreateArticleRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        check_required(
            &self.title,
            TITLE_MAX_CHARS,
            "title is required",
            "title must be <= 200 chars",
        )?;
        check_required(
            &self.content,
            CONTENT_MAX_CHARS,
            "content is required",
            "content must be <= 50000 chars",
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateArticleRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title {
            check_required(
                title,
                TITLE_MAX_CHARS,
                "title cannot be empty",
                "title must be <= 200 chars",
            )?;
        }
        if let Some(content) = &self.content {
            check_required(
                content,
                CONTENT_MAX_CHARS,
                "content cannot be empty",
                "content must be <= 50000 chars",
            )?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: String, // encoded
    pub author_id: String, // encoded
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_and_content() {
        let req = CreateArticleRequest {
            title: "".to_string(),
            content: "body".to_string(),
        };
        assert_eq!(req.validate(), Err("title is required"));

        let req = CreateArticleRequest {
            title: "Hello".to_string(),
            content: " ".to_string(),
        };
        assert_eq!(req.validate(), Err("content is required"));
    }

    #[test]
    fn update_rejects_empty_title() {
        let req = UpdateArticleRequest {
            title: Some(String::new()),
            content: None,
        };
        assert_eq!(req.validate(), Err("title cannot be empty"));
    }
}

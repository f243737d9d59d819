/*
 * Responsibility
 * - Business categories の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_max, check_required, nullable};

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

pub(crate) fn validate_name(name: &str) -> Result<(), &'static str> {
    check_required(name, NAME_MAX_CHARS, "name is required", "name must be <= 100 chars")
}

pub(crate) fn validate_description(description: &str) -> Result<(), &'static str> {
    check_max(
        description,
        DESCRIPTION_MAX_CHARS,
        "description must be <= 2000 chars",
    )
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name {
            validate_name(name).map_err(|_| "name cannot be empty or > 100 chars")?;
        }
        if let Some(Some(description)) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_name() {
        let req: CreateCategoryRequest =
            serde_json::from_str(r#"{"name": "  ", "description": null}"#).unwrap();
        assert_eq!(req.validate(), Err("name is required"));
    }

    #[test]
    fn update_rejects_blank_name_but_accepts_empty_patch() {
        let req: UpdateCategoryRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(req.validate().is_err());

        let req: UpdateCategoryRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
        assert!(req.description.is_none());
    }
}

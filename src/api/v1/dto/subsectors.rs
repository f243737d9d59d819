/*
 * Responsibility
 * - Subsectors の request/response DTO
 * - business_category_id は公開 ID (handler で decode)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::categories::{validate_description, validate_name};
use super::nullable;
use super::pagination::Page;

#[derive(Debug, Default, Deserialize)]
pub struct SubsectorListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub business_category_id: Option<String>,
}

impl SubsectorListQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSubsectorRequest {
    pub business_category_id: String,
    pub name: String,
    pub description: Option<String>,
}

impl CreateSubsectorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.business_category_id.trim().is_empty() {
            return Err("business_category_id is required");
        }
        validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubsectorRequest {
    pub business_category_id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl UpdateSubsectorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(category_id) = &self.business_category_id
            && category_id.trim().is_empty()
        {
            return Err("business_category_id cannot be empty");
        }
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
pub struct SubsectorResponse {
    pub id: String,
    pub business_category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

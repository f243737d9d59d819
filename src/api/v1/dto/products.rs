/*
 * Responsibility
 * - Products の request/response DTO
 * - price は最小通貨単位の整数 (負数は不可)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::Page;
use super::{check_max, check_required, nullable};

pub const NAME_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 5000;

fn validate_name(name: &str) -> Result<(), &'static str> {
    check_required(name, NAME_MAX_CHARS, "name is required", "name must be <= 200 chars")
}

fn validate_description(description: &str) -> Result<(), &'static str> {
    check_max(
        description,
        DESCRIPTION_MAX_CHARS,
        "description must be <= 5000 chars",
    )
}

fn validate_price(price: i64) -> Result<(), &'static str> {
    if price < 0 {
        return Err("price must be >= 0");
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub subsector_id: Option<String>,
}

impl ProductListQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub subsector_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.subsector_id.trim().is_empty() {
            return Err("subsector_id is required");
        }
        validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        validate_price(self.price)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub subsector_id: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub price: Option<i64>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(subsector_id) = &self.subsector_id
            && subsector_id.trim().is_empty()
        {
            return Err("subsector_id cannot be empty");
        }
        if let Some(name) = &self.name {
            validate_name(name).map_err(|_| "name cannot be empty or > 200 chars")?;
        }
        if let Some(Some(description)) = &self.description {
            validate_description(description)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub subsector_id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"subsector_id": "abc", "name": "Bread", "price": -1}"#,
        )
        .unwrap();
        assert_eq!(req.validate(), Err("price must be >= 0"));

        let req: UpdateProductRequest = serde_json::from_str(r#"{"price": -10}"#).unwrap();
        assert_eq!(req.validate(), Err("price must be >= 0"));
    }

    #[test]
    fn zero_price_is_allowed() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"subsector_id": "abc", "name": "Sample", "price": 0}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validation::{normalize_whitespace, validate_not_blank};

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Request DTO for creating or replacing a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryRequestDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank", message = "Name is required")
    )]
    pub name: String,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CategoryRequestDto {
    /// Name with surrounding and repeated whitespace collapsed
    pub fn normalized_name(&self) -> String {
        normalize_whitespace(&self.name)
    }

    /// Description trimmed, with empty text treated as absent
    pub fn normalized_description(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active_defaults_to_true() {
        let dto: CategoryRequestDto =
            serde_json::from_str(r#"{"name": "Sustainability"}"#).unwrap();
        assert!(dto.is_active);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_name_rules() {
        let blank: CategoryRequestDto = serde_json::from_str(r#"{"name": "   "}"#).unwrap();
        assert!(blank.validate().is_err());

        let long = CategoryRequestDto {
            name: "x".repeat(101),
            description: None,
            is_active: true,
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_normalization() {
        let dto = CategoryRequestDto {
            name: "  Green   Energy ".to_string(),
            description: Some("   ".to_string()),
            is_active: false,
        };
        assert_eq!(dto.normalized_name(), "Green Energy");
        assert_eq!(dto.normalized_description(), None);
    }
}

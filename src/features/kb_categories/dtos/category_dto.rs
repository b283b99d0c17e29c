use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::kb_categories::models::{Category, CategoryFields};
use crate::shared::validation::SLUG_REGEX;

// Create request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Lowercase alphanumeric segments separated by hyphens (e.g. `getting-started`)
    #[validate(
        length(min = 1, max = 100),
        regex(path = *SLUG_REGEX, message = "slug must be lowercase alphanumeric segments separated by single hyphens")
    )]
    pub slug: String,

    pub description: Option<String>,

    /// Defaults to 0
    pub sort_order: Option<i32>,

    /// Defaults to true
    pub is_active: Option<bool>,
}

impl From<CreateCategoryDto> for CategoryFields {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            sort_order: dto.sort_order.unwrap_or(0),
            is_active: dto.is_active.unwrap_or(true),
        }
    }
}

// Update request (full replace: an omitted description is cleared)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(
        length(min = 1, max = 100),
        regex(path = *SLUG_REGEX, message = "slug must be lowercase alphanumeric segments separated by single hyphens")
    )]
    pub slug: String,

    pub description: Option<String>,

    pub sort_order: i32,

    pub is_active: bool,
}

impl From<UpdateCategoryDto> for CategoryFields {
    fn from(dto: UpdateCategoryDto) -> Self {
        Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            sort_order: dto.sort_order,
            is_active: dto.is_active,
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            sort_order: c.sort_order,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a knowledge-base category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable columns, used for both insert and full-replace update
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFields {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

/// Row filter for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    ActiveOnly,
}

/// Row ordering for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOrder {
    /// `sort_order` ascending, then `name` ascending
    Display,
    /// Most recently created first
    Newest,
}

impl CategoryOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CategoryOrder::Display => "sort_order ASC, name ASC",
            CategoryOrder::Newest => "created_at DESC, id DESC",
        }
    }
}

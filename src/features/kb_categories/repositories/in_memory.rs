//! In-memory repository used by service and handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::CategoryRepository;
use crate::core::error::{AppError, Result};
use crate::features::kb_categories::models::{
    Category, CategoryFields, CategoryFilter, CategoryOrder,
};

#[derive(Clone, Default)]
pub struct InMemoryCategoryRepository {
    rows: Arc<Mutex<Vec<Category>>>,
    unavailable: bool,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every call fails as if the database were unreachable
    pub fn unavailable() -> Self {
        Self {
            rows: Arc::default(),
            unavailable: true,
        }
    }

    /// Number of stored rows
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    /// Mirrors the unique indexes on `name` and `slug`
    fn check_unique(
        rows: &[Category],
        fields: &CategoryFields,
        exclude_id: Option<Uuid>,
    ) -> Result<()> {
        let clash = rows.iter().any(|c| {
            Some(c.id) != exclude_id && (c.name == fields.name || c.slug == fields.slug)
        });
        if clash {
            return Err(AppError::Duplicate(
                "Unique constraint violated: kb_categories_name_unique".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_name_or_slug(
        &self,
        name: &str,
        slug: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Category>> {
        self.check_available()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| Some(c.id) != exclude_id && (c.name == name || c.slug == slug))
            .cloned())
    }

    async fn find_all(
        &self,
        filter: CategoryFilter,
        order: CategoryOrder,
    ) -> Result<Vec<Category>> {
        self.check_available()?;
        let mut categories: Vec<Category> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| filter == CategoryFilter::All || c.is_active)
            .cloned()
            .collect();

        match order {
            CategoryOrder::Display => categories.sort_by(|a, b| {
                a.sort_order
                    .cmp(&b.sort_order)
                    .then_with(|| a.name.cmp(&b.name))
            }),
            CategoryOrder::Newest => categories.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.cmp(&a.id))
            }),
        }

        Ok(categories)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        self.check_available()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert(&self, fields: &CategoryFields) -> Result<Category> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();
        Self::check_unique(&rows, fields, None)?;

        // Strictly increasing timestamps keep creation order observable
        let now = Utc::now();
        let created_at = rows
            .iter()
            .map(|c| c.created_at)
            .max()
            .filter(|last| *last >= now)
            .map(|last| last + Duration::microseconds(1))
            .unwrap_or(now);

        let category = Category {
            id: Uuid::now_v7(),
            name: fields.name.clone(),
            slug: fields.slug.clone(),
            description: fields.description.clone(),
            sort_order: fields.sort_order,
            is_active: fields.is_active,
            created_at,
            updated_at: created_at,
        };
        rows.push(category.clone());

        Ok(category)
    }

    async fn update(&self, id: Uuid, fields: &CategoryFields) -> Result<Option<Category>> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();
        Self::check_unique(&rows, fields, Some(id))?;

        let Some(category) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.name = fields.name.clone();
        category.slug = fields.slug.clone();
        category.description = fields.description.clone();
        category.sort_order = fields.sort_order;
        category.is_active = fields.is_active;
        category.updated_at = Utc::now();

        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);

        Ok(rows.len() < before)
    }
}

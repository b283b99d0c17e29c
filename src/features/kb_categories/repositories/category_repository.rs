use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::kb_categories::models::{
    Category, CategoryFields, CategoryFilter, CategoryOrder,
};

const COLUMNS: &str =
    "id, name, slug, description, sort_order, is_active, created_at, updated_at";

/// Persistence contract for KB categories.
///
/// Store-level unique violations surface as `AppError::Duplicate`.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// First category whose name OR slug matches, optionally ignoring one id
    async fn find_by_name_or_slug(
        &self,
        name: &str,
        slug: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Category>>;

    async fn find_all(&self, filter: CategoryFilter, order: CategoryOrder)
        -> Result<Vec<Category>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    async fn insert(&self, fields: &CategoryFields) -> Result<Category>;

    /// Overwrites every writable column; `None` if the row no longer exists
    async fn update(&self, id: Uuid, fields: &CategoryFields) -> Result<Option<Category>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Convert database error to a more specific AppError
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::Duplicate(format!(
                "Unique constraint violated: {}",
                db_err.constraint().unwrap_or("unknown")
            ));
        }
    }

    AppError::Database(e)
}

/// PostgreSQL-backed repository over the `kb_categories` table
#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_name_or_slug(
        &self,
        name: &str,
        slug: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Category>> {
        let query = format!(
            r#"
            SELECT {COLUMNS}
            FROM kb_categories
            WHERE (name = $1 OR slug = $2)
              AND ($3::uuid IS NULL OR id <> $3)
            LIMIT 1
            "#
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .bind(slug)
            .bind(exclude_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_all(
        &self,
        filter: CategoryFilter,
        order: CategoryOrder,
    ) -> Result<Vec<Category>> {
        let where_clause = match filter {
            CategoryFilter::All => "",
            CategoryFilter::ActiveOnly => "WHERE is_active = TRUE",
        };

        let query = format!(
            r#"
            SELECT {COLUMNS}
            FROM kb_categories
            {}
            ORDER BY {}
            "#,
            where_clause,
            order.as_sql()
        );

        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let query = format!("SELECT {COLUMNS} FROM kb_categories WHERE id = $1");

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn insert(&self, fields: &CategoryFields) -> Result<Category> {
        let query = format!(
            r#"
            INSERT INTO kb_categories (id, name, slug, description, sort_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(Uuid::now_v7())
            .bind(&fields.name)
            .bind(&fields.slug)
            .bind(&fields.description)
            .bind(fields.sort_order)
            .bind(fields.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn update(&self, id: Uuid, fields: &CategoryFields) -> Result<Option<Category>> {
        let query = format!(
            r#"
            UPDATE kb_categories
            SET name = $1,
                slug = $2,
                description = $3,
                sort_order = $4,
                is_active = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(&fields.name)
            .bind(&fields.slug)
            .bind(&fields.description)
            .bind(fields.sort_order)
            .bind(fields.is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kb_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}

use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::kb_categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::kb_categories::models::{CategoryFields, CategoryFilter, CategoryOrder};
use crate::features::kb_categories::repositories::CategoryRepository;

pub const CREATE_DUPLICATE_MESSAGE: &str = "Category name or slug already exists";
pub const UPDATE_DUPLICATE_MESSAGE: &str = "Slug or name already exists";
pub const NOT_FOUND_MESSAGE: &str = "Category not found";

/// Log unexpected failures with the operation name; client errors pass through quietly
fn log_failure(operation: &'static str) -> impl Fn(AppError) -> AppError {
    move |e| {
        if matches!(e, AppError::Database(_)) {
            tracing::error!("{} Error: {:?}", operation, e);
        }
        e
    }
}

/// A store-level unique violation reports the same message as the pre-check
fn duplicate_as(message: &'static str) -> impl Fn(AppError) -> AppError {
    move |e| match e {
        AppError::Duplicate(_) => AppError::Duplicate(message.to_string()),
        other => other,
    }
}

/// Service for knowledge-base category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Create a category after checking that neither name nor slug is taken
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let fields = CategoryFields::from(dto);

        let existing = self
            .repository
            .find_by_name_or_slug(&fields.name, &fields.slug, None)
            .await
            .map_err(log_failure("Create Category"))?;
        if existing.is_some() {
            return Err(AppError::Duplicate(CREATE_DUPLICATE_MESSAGE.to_string()));
        }

        let category = self
            .repository
            .insert(&fields)
            .await
            .map_err(duplicate_as(CREATE_DUPLICATE_MESSAGE))
            .map_err(log_failure("Create Category"))?;

        tracing::info!(category_id = %category.id, slug = %category.slug, "KB category created");

        Ok(category.into())
    }

    /// Active categories ordered for display (sort_order, then name)
    pub async fn list_active(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self
            .repository
            .find_all(CategoryFilter::ActiveOnly, CategoryOrder::Display)
            .await
            .map_err(log_failure("Get Active Categories"))?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Every category, newest first
    pub async fn list_all(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self
            .repository
            .find_all(CategoryFilter::All, CategoryOrder::Newest)
            .await
            .map_err(log_failure("Get All Categories"))?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Replace every writable field of an existing category
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(log_failure("Update Category"))?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        let fields = CategoryFields::from(dto);

        let duplicate = self
            .repository
            .find_by_name_or_slug(&fields.name, &fields.slug, Some(id))
            .await
            .map_err(log_failure("Update Category"))?;
        if duplicate.is_some() {
            return Err(AppError::Duplicate(UPDATE_DUPLICATE_MESSAGE.to_string()));
        }

        let category = self
            .repository
            .update(id, &fields)
            .await
            .map_err(duplicate_as(UPDATE_DUPLICATE_MESSAGE))
            .map_err(log_failure("Update Category"))?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        tracing::info!(category_id = %category.id, "KB category updated");

        Ok(category.into())
    }

    /// Permanently remove a category
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(log_failure("Delete Category"))?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(log_failure("Delete Category"))?;
        if !removed {
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }

        tracing::info!(category_id = %id, "KB category deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::kb_categories::repositories::InMemoryCategoryRepository;
    use fake::faker::lorem::en::Word;
    use fake::Fake;

    fn service() -> (CategoryService, InMemoryCategoryRepository) {
        let repository = InMemoryCategoryRepository::new();
        (
            CategoryService::new(Arc::new(repository.clone())),
            repository,
        )
    }

    fn create_dto(name: &str, slug: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            sort_order: None,
            is_active: None,
        }
    }

    fn update_dto(
        name: &str,
        slug: &str,
        description: Option<&str>,
        sort_order: i32,
        is_active: bool,
    ) -> UpdateCategoryDto {
        UpdateCategoryDto {
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.map(String::from),
            sort_order,
            is_active,
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (service, _) = service();

        let created = service
            .create(create_dto("Billing", "billing"))
            .await
            .unwrap();

        assert_eq!(created.name, "Billing");
        assert_eq!(created.slug, "billing");
        assert_eq!(created.sort_order, 0);
        assert!(created.is_active);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates_without_inserting() {
        let (service, repository) = service();
        service
            .create(create_dto("Billing", "billing"))
            .await
            .unwrap();

        for (name, slug) in [
            ("Billing", "billing-2"),
            ("Payments", "billing"),
            ("Billing", "billing"),
        ] {
            let err = service.create(create_dto(name, slug)).await.unwrap_err();
            assert!(
                matches!(err, AppError::Duplicate(ref msg) if msg == CREATE_DUPLICATE_MESSAGE),
                "expected duplicate for ({}, {}), got {:?}",
                name,
                slug,
                err
            );
        }

        assert_eq!(repository.row_count(), 1);
    }

    #[tokio::test]
    async fn test_list_active_filters_and_orders() {
        let (service, _) = service();

        for i in 0..20 {
            let word: String = Word().fake();
            let mut dto = create_dto(&format!("{} {}", word, i), &format!("cat-{}", i));
            dto.sort_order = Some((0..4i32).fake::<i32>());
            dto.is_active = Some(i % 3 != 0);
            service.create(dto).await.unwrap();
        }

        let active = service.list_active().await.unwrap();

        assert_eq!(active.len(), 13);
        assert!(active.iter().all(|c| c.is_active));
        for pair in active.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.sort_order < b.sort_order || (a.sort_order == b.sort_order && a.name <= b.name),
                "{:?} listed before {:?}",
                (a.sort_order, &a.name),
                (b.sort_order, &b.name)
            );
        }
    }

    #[tokio::test]
    async fn test_list_all_is_newest_first_and_includes_inactive() {
        let (service, _) = service();

        let mut inactive = create_dto("Archived", "archived");
        inactive.is_active = Some(false);
        let first = service.create(inactive).await.unwrap();
        let second = service.create(create_dto("FAQ", "faq")).await.unwrap();
        let third = service
            .create(create_dto("Billing", "billing"))
            .await
            .unwrap();

        let all = service.list_all().await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|c| c.id).collect();

        assert_eq!(ids, vec![third.id, second.id, first.id]);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (service, _) = service();
        service.create(create_dto("FAQ", "faq")).await.unwrap();

        let err = service
            .update(Uuid::now_v7(), update_dto("Other", "other", None, 0, true))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref msg) if msg == NOT_FOUND_MESSAGE));
        let all = service.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "FAQ");
    }

    #[tokio::test]
    async fn test_update_conflicts_with_other_category_only() {
        let (service, _) = service();
        let faq = service.create(create_dto("FAQ", "faq")).await.unwrap();
        service
            .create(create_dto("Billing", "billing"))
            .await
            .unwrap();

        let err = service
            .update(faq.id, update_dto("FAQ", "billing", None, 0, true))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate(ref msg) if msg == UPDATE_DUPLICATE_MESSAGE));

        let updated = service
            .update(faq.id, update_dto("FAQ", "faq", Some("Common questions"), 2, true))
            .await
            .unwrap();
        assert_eq!(updated.id, faq.id);
        assert_eq!(updated.sort_order, 2);
        assert_eq!(updated.description.as_deref(), Some("Common questions"));
        assert_eq!(updated.created_at, faq.created_at);
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let (service, _) = service();
        let mut dto = create_dto("FAQ", "faq");
        dto.description = Some("Common questions".to_string());
        let faq = service.create(dto).await.unwrap();

        let updated = service
            .update(faq.id, update_dto("FAQ", "faq", None, 0, false))
            .await
            .unwrap();

        assert_eq!(updated.description, None);
        assert!(!updated.is_active);
        assert!(service.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let (service, repository) = service();
        let faq = service.create(create_dto("FAQ", "faq")).await.unwrap();

        service.delete(faq.id).await.unwrap();
        assert_eq!(repository.find_by_id(faq.id).await.unwrap(), None);

        let err = service.delete(faq.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates_as_database_error() {
        let service = CategoryService::new(Arc::new(InMemoryCategoryRepository::unavailable()));

        assert!(matches!(
            service.list_active().await,
            Err(AppError::Database(_))
        ));
        assert!(matches!(
            service.create(create_dto("FAQ", "faq")).await,
            Err(AppError::Database(_))
        ));
    }

    #[test]
    fn test_store_duplicate_is_reported_with_operation_message() {
        let mapped = duplicate_as(UPDATE_DUPLICATE_MESSAGE)(AppError::Duplicate(
            "Unique constraint violated: kb_categories_slug_unique".to_string(),
        ));
        assert!(matches!(mapped, AppError::Duplicate(ref msg) if msg == UPDATE_DUPLICATE_MESSAGE));

        let untouched = duplicate_as(UPDATE_DUPLICATE_MESSAGE)(AppError::NotFound("x".into()));
        assert!(matches!(untouched, AppError::NotFound(_)));
    }
}

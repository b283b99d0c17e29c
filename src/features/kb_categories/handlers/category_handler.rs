use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireKbAdmin;
use crate::features::kb_categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::kb_categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// Create a KB category (KB admin only)
#[utoipa::path(
    post,
    path = "/api/admin/kb/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or name/slug already exists"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden - KB admin only")
    ),
    tag = "kb-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    RequireKbAdmin(_user): RequireKbAdmin,
    State(service): State<Arc<CategoryService>>,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Category created successfully".to_string()),
        )),
    ))
}

/// List active KB categories
///
/// Ordered by `sort_order`, then `name`.
#[utoipa::path(
    get,
    path = "/api/kb/categories",
    responses(
        (status = 200, description = "Active categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "kb-categories"
)]
pub async fn list_active_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_active().await?;
    Ok(Json(ApiResponse::success(Some(categories), None)))
}

/// List every KB category, active or not (KB admin only)
///
/// Newest first.
#[utoipa::path(
    get,
    path = "/api/admin/kb/categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden - KB admin only")
    ),
    tag = "kb-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_all_categories(
    RequireKbAdmin(_user): RequireKbAdmin,
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_all().await?;
    Ok(Json(ApiResponse::success(Some(categories), None)))
}

/// Replace a KB category (KB admin only)
#[utoipa::path(
    put,
    path = "/api/admin/kb/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or name/slug already exists"),
        (status = 404, description = "Category not found"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden - KB admin only")
    ),
    tag = "kb-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    RequireKbAdmin(_user): RequireKbAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category),
        Some("Category updated successfully".to_string()),
    )))
}

/// Delete a KB category permanently (KB admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/kb/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted successfully"),
        (status = 404, description = "Category not found"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden - KB admin only")
    ),
    tag = "kb-categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    RequireKbAdmin(_user): RequireKbAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::message("Category deleted successfully")))
}

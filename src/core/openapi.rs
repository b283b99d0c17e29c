use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::kb_categories::{
    dtos as kb_categories_dtos, handlers as kb_categories_handlers,
};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // KB categories
        kb_categories_handlers::create_category,
        kb_categories_handlers::list_active_categories,
        kb_categories_handlers::list_all_categories,
        kb_categories_handlers::update_category,
        kb_categories_handlers::delete_category,
    ),
    components(
        schemas(
            kb_categories_dtos::CreateCategoryDto,
            kb_categories_dtos::UpdateCategoryDto,
            kb_categories_dtos::CategoryResponseDto,
            ApiResponse<kb_categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<kb_categories_dtos::CategoryResponseDto>>,
        )
    ),
    tags(
        (name = "kb-categories", description = "Knowledge-base categories"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "KB Categories API",
        version = "0.1.0",
        description = "API documentation for knowledge-base categories",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

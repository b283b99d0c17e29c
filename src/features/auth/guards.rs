//! Role-based authorization guards.
//!
//! Guards read the `AuthenticatedUser` placed in request extensions by the
//! bearer auth middleware and reject callers missing the required role.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for knowledge-base administration.
///
/// Allows users with the "super_admin" or "kb_admin" role.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireKbAdmin(user): RequireKbAdmin) { ... }
/// ```
pub struct RequireKbAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireKbAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.has_kb_admin_access() {
            return Err(AppError::Forbidden(
                "Knowledge-base admin access required".to_string(),
            ));
        }

        Ok(RequireKbAdmin(user.clone()))
    }
}

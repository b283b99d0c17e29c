#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, Router};

#[cfg(test)]
pub fn create_user(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-sub".to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// Inject `user` into every request, standing in for the bearer auth middleware
#[cfg(test)]
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

#[cfg(test)]
pub fn with_kb_admin_auth(router: Router) -> Router {
    with_user(router, create_user(&["kb_admin"]))
}

use crate::core::error::AppError;
use crate::features::auth::JwtValidator;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::now_v7().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// HTTP basic auth in front of the Swagger UI
pub async fn basic_auth_middleware(
    State(valid_credentials): State<Arc<String>>,
    req: Request,
    next: Next,
) -> Response {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Basic "))
        .and_then(|encoded| BASE64_STANDARD.decode(encoded).ok())
        .and_then(|decoded| String::from_utf8(decoded).ok())
        .is_some_and(|creds| creds == *valid_credentials);

    if authorized {
        return next.run(req).await;
    }

    let mut response = Response::new(Body::from("Unauthorized"));
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"Swagger UI\""),
    );
    response
}

/// Validate the bearer token and put the `AuthenticatedUser` into request extensions
pub async fn auth_middleware(
    State(validator): State<Arc<JwtValidator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let user = validator.validate_token(token)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::features::auth::guards::RequireKbAdmin;
    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use axum_test::TestServer;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::Duration;

    const SECRET: &str = "middleware-secret";

    async fn admin_only(RequireKbAdmin(user): RequireKbAdmin) -> String {
        user.sub
    }

    fn server() -> TestServer {
        let validator = Arc::new(JwtValidator::new(&AuthConfig {
            jwt_secret: SECRET.to_string(),
            jwt_issuer: None,
            jwt_leeway: Duration::from_secs(0),
        }));
        let app = Router::new()
            .route("/admin", get(admin_only))
            .route_layer(from_fn_with_state(validator, auth_middleware));
        TestServer::new(app).unwrap()
    }

    fn bearer(roles: &[&str]) -> String {
        let claims = serde_json::json!({
            "sub": "admin-1",
            "exp": chrono::Utc::now().timestamp() + 3600,
            "roles": roles,
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        format!("Bearer {}", token)
    }

    #[tokio::test]
    async fn test_valid_admin_token_passes() {
        let response = server()
            .get("/admin")
            .add_header(header::AUTHORIZATION, bearer(&["kb_admin"]))
            .await;

        response.assert_status_ok();
        response.assert_text("admin-1");
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header_is_unauthorized() {
        let server = server();

        server.get("/admin").await.assert_status_unauthorized();
        server
            .get("/admin")
            .add_header(header::AUTHORIZATION, "Token abc")
            .await
            .assert_status_unauthorized();
        server
            .get("/admin")
            .add_header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_token_without_admin_role_is_forbidden() {
        server()
            .get("/admin")
            .add_header(header::AUTHORIZATION, bearer(&["citizen"]))
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_basic_auth_guards_swagger() {
        let credentials = Arc::new("docs:secret".to_string());
        let app = Router::new()
            .route("/swagger-ui", get(|| async { "ok" }))
            .layer(from_fn_with_state(credentials, basic_auth_middleware));
        let server = TestServer::new(app).unwrap();

        server.get("/swagger-ui").await.assert_status_unauthorized();
        server
            .get("/swagger-ui")
            .add_header(
                header::AUTHORIZATION,
                format!("Basic {}", BASE64_STANDARD.encode("docs:secret")),
            )
            .await
            .assert_status_ok();
    }
}

//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::domain::DomainError;
use crate::infrastructure::crypto::{verify_token, JwtConfig, TokenClaims};

/// Authentication failure reasons. All of them surface to the client as
/// the same `Unauthorized` response; the reason is only logged.
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidScheme,
    InvalidToken(jsonwebtoken::errors::Error),
}

/// Authentication state containing the JWT config
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Identity of the caller, inserted into request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(
    request: &Request<Body>,
    jwt_config: &JwtConfig,
) -> Result<AuthenticatedUser, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = extract_token(auth_header).ok_or(AuthError::InvalidScheme)?;

    let claims = verify_token(token, jwt_config).map_err(AuthError::InvalidToken)?;
    Ok(AuthenticatedUser::from_claims(claims))
}

/// Bearer JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&request, &auth_state.jwt_config) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(reason) => {
            debug!(?reason, path = %request.uri().path(), "Rejected unauthenticated request");
            DomainError::Unauthorized.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{middleware, Extension, Router};
    use tower::Service;

    use crate::infrastructure::crypto::create_token;

    fn config() -> JwtConfig {
        JwtConfig::new("middleware-secret", 30)
    }

    fn app() -> Router {
        let state = AuthState {
            jwt_config: config(),
        };
        Router::new()
            .route(
                "/me",
                get(|Extension(user): Extension<AuthenticatedUser>| async move { user.user_id }),
            )
            .route_layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn call(auth: Option<String>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/me");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let resp = app()
            .into_service()
            .call(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("Bearer "), None);
    }

    #[tokio::test]
    async fn valid_token_exposes_identity() {
        let token = create_token("user-42", &config()).unwrap();
        let (status, body) = call(Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "user-42");
    }

    #[tokio::test]
    async fn missing_header_is_forbidden() {
        let (status, body) = call(None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, r#"{"message":"User is not authorized"}"#);
    }

    #[tokio::test]
    async fn foreign_secret_is_rejected() {
        let token = create_token("user-42", &JwtConfig::new("other-secret", 30)).unwrap();
        let (status, _) = call(Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let (status, _) = call(Some("Bearer not.a.jwt".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

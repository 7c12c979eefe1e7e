//! Mapping of [`DomainError`] onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, FieldError};

/// Error body: `{"message": ...}` plus field errors for validation failures
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Plain `{"message": ...}` success body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl ErrorBody {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_)
            | Self::Conflict(_)
            | Self::InvalidCredentials
            | Self::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::ModelNotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) | Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::InvalidInput(errors) => ErrorBody {
                message: "Validation failed".into(),
                errors: Some(errors),
            },
            Self::NotFound { entity, .. } => ErrorBody::message(format!("{} not found", entity)),
            Self::ModelNotFound(_) => ErrorBody::message("Model not found"),
            Self::InsufficientFunds { .. } => ErrorBody::message("Insufficient funds"),
            Self::Upstream(_) => ErrorBody::message("Text generation failed"),
            Self::Internal(detail) => {
                error!(%detail, "Internal error");
                ErrorBody::message("Internal server error")
            }
            other => ErrorBody::message(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn render(err: DomainError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_lists_every_field() {
        let (status, body) = render(DomainError::InvalidInput(vec![
            FieldError::new("email", "invalid email"),
            FieldError::new("password", "too short"),
        ]))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"][1], json!({"field": "password", "message": "too short"}));
    }

    #[tokio::test]
    async fn unauthorized_is_403_with_fixed_message() {
        let (status, body) = render(DomainError::Unauthorized).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({"message": "User is not authorized"}));
    }

    #[tokio::test]
    async fn internal_detail_is_hidden() {
        let (status, body) = render(DomainError::Internal("db exploded".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn statuses() {
        assert_eq!(DomainError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            DomainError::InsufficientFunds { required: 1 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(DomainError::ModelNotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            DomainError::Upstream("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(DomainError::Conflict("x".into()).status_code(), StatusCode::BAD_REQUEST);
    }
}

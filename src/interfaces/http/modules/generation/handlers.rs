//! Generation API handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use super::dto::{GenerateRequest, GenerateTextRequest, GeneratedTextResponse};
use crate::application::GenerationService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ErrorBody, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct GenerationState {
    pub generation: Arc<GenerationService>,
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "Generation",
    security(("bearer_auth" = [])),
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generation charged", body = MessageResponse),
        (status = 400, description = "Insufficient funds or invalid input", body = ErrorBody),
        (status = 404, description = "Unknown model", body = ErrorBody)
    )
)]
pub async fn generate(
    State(state): State<GenerationState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<GenerateRequest>,
) -> Result<Json<MessageResponse>, DomainError> {
    let message = state
        .generation
        .generate(&user.user_id, &request.model_name, request.tokens_used)
        .await?;
    Ok(Json(MessageResponse { message }))
}

#[utoipa::path(
    post,
    path = "/generate-text",
    tag = "Generation",
    security(("bearer_auth" = [])),
    request_body = GenerateTextRequest,
    responses(
        (status = 200, description = "Provider response", body = GeneratedTextResponse),
        (status = 400, description = "Insufficient funds", body = ErrorBody),
        (status = 500, description = "Provider call failed", body = ErrorBody)
    )
)]
pub async fn generate_text(
    State(state): State<GenerationState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<GenerateTextRequest>,
) -> Result<Json<GeneratedTextResponse>, DomainError> {
    let generated_text = state
        .generation
        .generate_text(&user.user_id, request.prompt, request.model_name)
        .await?;
    Ok(Json(GeneratedTextResponse { generated_text }))
}

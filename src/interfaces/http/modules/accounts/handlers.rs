//! Account API handlers
//!
//! Thin wrappers over `AccountService`.

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use super::dto::{AuthResponse, LoginRequest, RegisterRequest, UserDto};
use crate::application::AccountService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AccountsState {
    pub accounts: Arc<AccountService>,
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation failed or email taken", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, DomainError> {
    let result = state.accounts.register(request.into()).await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Invalid login or password", body = ErrorBody),
        (status = 404, description = "Unknown email", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, DomainError> {
    let result = state.accounts.login(&request.email, &request.password).await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/user",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 403, description = "Not authorized", body = ErrorBody),
        (status = 404, description = "User no longer exists", body = ErrorBody)
    )
)]
pub async fn get_current_user(
    State(state): State<AccountsState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserDto>, DomainError> {
    let user = state.accounts.get_current_user(&user.user_id).await?;
    Ok(Json(user.into()))
}

//! Balance API handlers

use std::sync::Arc;

use axum::body::Bytes;
use axum::{extract::State, Extension, Json};
use validator::Validate;

use super::dto::{BalanceResponse, SetBalanceRequest, UpdatedUserResponse};
use crate::application::{AccountService, LedgerService};
use crate::domain::DomainError;
use crate::interfaces::http::common::ErrorBody;
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct BalanceState {
    pub accounts: Arc<AccountService>,
    pub ledger: Arc<LedgerService>,
}

#[utoipa::path(
    get,
    path = "/balance",
    tag = "Balance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current balance", body = BalanceResponse),
        (status = 403, description = "Not authorized", body = ErrorBody),
        (status = 404, description = "User no longer exists", body = ErrorBody)
    )
)]
pub async fn get_balance(
    State(state): State<BalanceState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<BalanceResponse>, DomainError> {
    let balance = state.accounts.get_balance(&user.user_id).await?;
    Ok(Json(BalanceResponse { balance }))
}

/// The body is parsed only after the role check so non-admins get 403
/// whatever they send.
#[utoipa::path(
    put,
    path = "/balance",
    tag = "Balance",
    security(("bearer_auth" = [])),
    request_body = SetBalanceRequest,
    responses(
        (status = 200, description = "Balance overwritten", body = UpdatedUserResponse),
        (status = 400, description = "Invalid amount", body = ErrorBody),
        (status = 403, description = "Caller is not an administrator", body = ErrorBody)
    )
)]
pub async fn set_balance(
    State(state): State<BalanceState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Bytes,
) -> Result<Json<UpdatedUserResponse>, DomainError> {
    state.ledger.ensure_admin(&user.user_id).await?;

    let request: SetBalanceRequest = serde_json::from_slice(&body)
        .map_err(|e| DomainError::invalid_field("money", e.to_string()))?;
    if request.validate().is_err() {
        return Err(DomainError::invalid_field("money", "Balance must be non-negative"));
    }

    let updated = state.ledger.set_balance(&user.user_id, request.money).await?;
    Ok(Json(UpdatedUserResponse {
        updated_user: updated.into(),
    }))
}

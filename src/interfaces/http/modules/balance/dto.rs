use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::interfaces::http::modules::accounts::UserDto;

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub balance: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetBalanceRequest {
    #[validate(range(min = 0, message = "Balance must be non-negative"))]
    pub money: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedUserResponse {
    pub updated_user: UserDto,
}

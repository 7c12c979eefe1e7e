use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert a user. A duplicate email yields `DomainError::Conflict`.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Overwrite the balance. Returns `None` if the user does not exist.
    async fn set_balance(&self, id: &str, amount: i64) -> DomainResult<Option<User>>;

    /// Subtract `amount` only if the current balance covers it, as one
    /// conditional update. Returns `false` when nothing was debited.
    async fn debit_balance(&self, id: &str, amount: i64) -> DomainResult<bool>;
}

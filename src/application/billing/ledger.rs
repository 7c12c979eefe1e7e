//! Balance mutations
//!
//! Every debit goes through [`LedgerService::debit`], which relies on the
//! repository's conditional decrement so a balance can never go negative.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult, User, UserRepositoryInterface};

pub struct LedgerService {
    users: Arc<dyn UserRepositoryInterface>,
}

impl LedgerService {
    pub fn new(users: Arc<dyn UserRepositoryInterface>) -> Self {
        Self { users }
    }

    /// Resolve the caller and require the admin role.
    pub async fn ensure_admin(&self, caller_id: &str) -> DomainResult<User> {
        match self.users.get_user_by_id(caller_id).await? {
            Some(user) if user.is_admin() => Ok(user),
            _ => {
                warn!(user_id = %caller_id, "Balance update refused for non-admin");
                Err(DomainError::Forbidden(
                    "Only administrators may set balances".into(),
                ))
            }
        }
    }

    /// Overwrite the caller's own balance. Admins only.
    pub async fn set_balance(&self, caller_id: &str, money: i64) -> DomainResult<User> {
        self.ensure_admin(caller_id).await?;

        if money < 0 {
            return Err(DomainError::invalid_field("money", "must be non-negative"));
        }

        let updated = self
            .users
            .set_balance(caller_id, money)
            .await?
            .ok_or_else(|| DomainError::user_not_found(caller_id))?;

        info!(user_id = %caller_id, balance = money, "Balance overwritten");
        Ok(updated)
    }

    /// Subtract `cost` atomically, or fail with `InsufficientFunds`
    /// leaving the balance untouched.
    pub async fn debit(&self, user_id: &str, cost: i64) -> DomainResult<()> {
        if self.users.debit_balance(user_id, cost).await? {
            info!(user_id = %user_id, cost, "Balance debited");
            Ok(())
        } else {
            Err(DomainError::InsufficientFunds { required: cost })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateUserDto, UserRole};
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::test_support::{file_db, memory_db};

    async fn setup(role: UserRole, balance: i64) -> (LedgerService, Arc<UserRepository>, User) {
        let repo = Arc::new(UserRepository::new(memory_db().await));
        let user = repo
            .create_user(CreateUserDto {
                first_name: "Anna".into(),
                last_name: "Smirnova".into(),
                patronymic: None,
                email: "anna@example.com".into(),
                password_hash: "hash".into(),
                role,
                balance,
            })
            .await
            .unwrap();
        (LedgerService::new(repo.clone()), repo, user)
    }

    #[tokio::test]
    async fn admin_overwrites_own_balance() {
        let (ledger, _, admin) = setup(UserRole::Admin, 1000).await;
        let updated = ledger.set_balance(&admin.id, 5000).await.unwrap();
        assert_eq!(updated.balance, 5000);
    }

    #[tokio::test]
    async fn non_admin_is_forbidden_for_any_amount() {
        let (ledger, repo, user) = setup(UserRole::Vip, 1000).await;

        for amount in [5000, -1, 0] {
            let err = ledger.set_balance(&user.id, amount).await.unwrap_err();
            assert!(matches!(err, DomainError::Forbidden(_)));
        }
        let after = repo.get_user_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(after.balance, 1000);
    }

    #[tokio::test]
    async fn unknown_caller_is_forbidden() {
        let (ledger, _, _) = setup(UserRole::Admin, 1000).await;
        let err = ledger.set_balance("ghost", 10).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn negative_amount_is_rejected() {
        let (ledger, _, admin) = setup(UserRole::Admin, 1000).await;
        let err = ledger.set_balance(&admin.id, -5).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn debit_beyond_balance_fails() {
        let (ledger, repo, user) = setup(UserRole::Regular, 5).await;
        let err = ledger.debit(&user.id, 6).await.unwrap_err();
        assert!(matches!(err, DomainError::InsufficientFunds { required: 6 }));

        ledger.debit(&user.id, 5).await.unwrap();
        assert_eq!(repo.get_user_by_id(&user.id).await.unwrap().unwrap().balance, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_debits_never_overdraw() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(UserRepository::new(file_db(dir.path()).await));
        let user = repo
            .create_user(CreateUserDto {
                first_name: "Anna".into(),
                last_name: "Smirnova".into(),
                patronymic: None,
                email: "race@example.com".into(),
                password_hash: "hash".into(),
                role: UserRole::Regular,
                balance: 100,
            })
            .await
            .unwrap();
        let ledger = Arc::new(LedgerService::new(repo.clone()));

        let barrier = Arc::new(tokio::sync::Barrier::new(10));
        let mut tasks = Vec::new();
        for _ in 0..10 {
            let ledger = ledger.clone();
            let barrier = barrier.clone();
            let id = user.id.clone();
            tasks.push(tokio::spawn(async move {
                barrier.wait().await;
                ledger.debit(&id, 30).await
            }));
        }

        let mut succeeded = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(()) => succeeded += 1,
                Err(e) => assert!(matches!(e, DomainError::InsufficientFunds { required: 30 })),
            }
        }

        assert_eq!(succeeded, 3);
        let after = repo.get_user_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(after.balance, 10);
    }
}

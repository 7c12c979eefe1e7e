//! Account service — application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
    STARTING_BALANCE,
};
use crate::infrastructure::crypto::{create_token, JwtConfig, PasswordHasher};

/// Authentication result returned after a successful register or login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

/// Already-validated registration input
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub email: String,
    pub password: String,
    pub is_vip: bool,
}

pub struct AccountService {
    repo: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
    hasher: PasswordHasher,
}

impl AccountService {
    pub fn new(
        repo: Arc<dyn UserRepositoryInterface>,
        jwt_config: JwtConfig,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            repo,
            jwt_config,
            hasher,
        }
    }

    // ── Registration ────────────────────────────────────────────

    /// Create an account with the starting balance and issue a token.
    pub async fn register(&self, cmd: RegisterCommand) -> DomainResult<AuthResult> {
        if self.repo.get_user_by_email(&cmd.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "User with email {} already exists",
                cmd.email
            )));
        }

        let role = UserRole::for_registration(cmd.is_vip);
        let user = self
            .create(cmd.first_name, cmd.last_name, cmd.patronymic, cmd.email, &cmd.password, role)
            .await?;

        info!(user_id = %user.id, role = %user.role, "New user registered");

        let token = create_token(&user.id, &self.jwt_config)?;
        Ok(AuthResult { token, user })
    }

    /// Create the configured administrator unless the email is taken.
    /// Returns `true` when a new account was inserted.
    pub async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> DomainResult<bool> {
        if self.repo.get_user_by_email(email).await?.is_some() {
            debug!(email, "Bootstrap admin already present");
            return Ok(false);
        }

        let user = self
            .create(
                first_name.to_string(),
                last_name.to_string(),
                None,
                email.to_string(),
                password,
                UserRole::Admin,
            )
            .await?;

        info!(user_id = %user.id, "Bootstrap admin created");
        Ok(true)
    }

    async fn create(
        &self,
        first_name: String,
        last_name: String,
        patronymic: Option<String>,
        email: String,
        password: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        let password_hash = self.hasher.hash(password)?;

        self.repo
            .create_user(CreateUserDto {
                first_name,
                last_name,
                patronymic,
                email,
                password_hash,
                role,
                balance: STARTING_BALANCE,
            })
            .await
    }

    // ── Authentication ──────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self
            .repo
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "User",
                field: "email",
                value: email.to_string(),
            })?;

        if !self.hasher.verify(password, &user.password_hash) {
            debug!(user_id = %user.id, "Password mismatch");
            return Err(DomainError::InvalidCredentials);
        }

        let token = create_token(&user.id, &self.jwt_config)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResult { token, user })
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_current_user(&self, user_id: &str) -> DomainResult<User> {
        self.repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }

    pub async fn get_balance(&self, user_id: &str) -> DomainResult<i64> {
        Ok(self.get_current_user(user_id).await?.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::verify_token;
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::test_support::memory_db;

    async fn service() -> AccountService {
        let repo = Arc::new(UserRepository::new(memory_db().await));
        AccountService::new(repo, JwtConfig::new("test-secret", 30), PasswordHasher::new(4))
    }

    fn command(email: &str, is_vip: bool) -> RegisterCommand {
        RegisterCommand {
            first_name: "Ivan".into(),
            last_name: "Petrov".into(),
            patronymic: Some("Sergeevich".into()),
            email: email.into(),
            password: "secret1".into(),
            is_vip,
        }
    }

    #[tokio::test]
    async fn register_grants_starting_balance_and_token() {
        let svc = service().await;
        let result = svc.register(command("ivan@example.com", false)).await.unwrap();

        assert_eq!(result.user.balance, STARTING_BALANCE);
        assert_eq!(result.user.role, UserRole::Regular);
        assert_ne!(result.user.password_hash, "secret1");

        let claims = verify_token(&result.token, &JwtConfig::new("test-secret", 30)).unwrap();
        assert_eq!(claims.sub, result.user.id);
    }

    #[tokio::test]
    async fn vip_flag_sets_role() {
        let svc = service().await;
        let result = svc.register(command("vip@example.com", true)).await.unwrap();
        assert_eq!(result.user.role, UserRole::Vip);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let svc = service().await;
        svc.register(command("dup@example.com", false)).await.unwrap();

        let err = svc.register(command("dup@example.com", true)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_checks_password() {
        let svc = service().await;
        let registered = svc.register(command("login@example.com", false)).await.unwrap();

        let ok = svc.login("login@example.com", "secret1").await.unwrap();
        assert_eq!(ok.user.id, registered.user.id);

        let err = svc.login("login@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));

        let err = svc.login("nobody@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn balance_of_missing_user_is_not_found() {
        let svc = service().await;
        let err = svc.get_balance("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let svc = service().await;
        assert!(svc.ensure_admin("root@example.com", "rootpw", "Admin", "Admin").await.unwrap());
        assert!(!svc.ensure_admin("root@example.com", "other", "Admin", "Admin").await.unwrap());

        let admin = svc.login("root@example.com", "rootpw").await.unwrap().user;
        assert!(admin.is_admin());
    }
}

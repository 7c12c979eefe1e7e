use super::UserRole;

/// Fields required to persist a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub balance: i64,
}

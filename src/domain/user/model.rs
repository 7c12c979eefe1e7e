use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credits minted for every newly registered account
pub const STARTING_BALANCE: i64 = 1000;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Regular,
    Vip,
    Admin,
}

impl UserRole {
    /// Role assigned at registration
    pub fn for_registration(is_vip: bool) -> Self {
        if is_vip {
            Self::Vip
        } else {
            Self::Regular
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Vip => "vip",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        self.balance >= cost
    }
}

//! Accounts module — register, login, current user

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

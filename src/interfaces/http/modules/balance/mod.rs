//! Balance module — read own balance, admin overwrite

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

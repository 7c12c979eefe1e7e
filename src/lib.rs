//! # Text Generation Gateway
//!
//! Credit-metered HTTP gateway in front of a text-generation provider.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Users, language models and repository traits
//! - **application**: Account, ledger, generation and streaming use cases
//! - **infrastructure**: Database, token/password crypto, upstream client
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Process bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, GatewayState};

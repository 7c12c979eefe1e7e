//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod language_model_repository;
pub mod user_repository;

pub use language_model_repository::LanguageModelRepository;
pub use user_repository::UserRepository;

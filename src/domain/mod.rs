//! Domain layer — entities, repository contracts and domain errors.

pub mod language_model;
pub mod user;

pub use language_model::{LanguageModel, LanguageModelRepositoryInterface};
pub use user::{CreateUserDto, User, UserRepositoryInterface, UserRole, STARTING_BALANCE};

pub use crate::shared::errors::{DomainError, DomainResult, FieldError};

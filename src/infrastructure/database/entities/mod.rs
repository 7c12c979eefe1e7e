//! Database entities module

pub mod language_model;
pub mod user;

pub use language_model::Entity as LanguageModel;
pub use user::Entity as User;

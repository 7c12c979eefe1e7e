//! Language model catalogue — names and per-100-token rates.

pub mod model;
pub mod repository;

pub use model::LanguageModel;
pub use repository::LanguageModelRepositoryInterface;

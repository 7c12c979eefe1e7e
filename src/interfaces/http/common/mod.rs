//! Shared HTTP plumbing: error responses and validated extractors

pub mod error;
pub mod validated_json;

pub use error::{ErrorBody, MessageResponse};
pub use validated_json::ValidatedJson;

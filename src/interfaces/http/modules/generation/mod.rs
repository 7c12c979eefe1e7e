//! Generation module — metered and flat-rate generation

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

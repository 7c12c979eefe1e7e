//! Server-sent event stream

pub mod handlers;

pub use handlers::*;

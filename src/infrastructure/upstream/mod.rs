//! Upstream text-generation provider client

pub mod http_provider;

pub use http_provider::{HttpCompletionProvider, UpstreamSettings};

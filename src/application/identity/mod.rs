//! Identity module — registration, login and profile lookups
//!
//! Contains the `AccountService` which owns password hashing and token
//! issuance for the gateway's users.

pub mod service;

pub use service::{AccountService, AuthResult, RegisterCommand};

pub mod accounts;
pub mod balance;
pub mod generation;
pub mod health;
pub mod stream;

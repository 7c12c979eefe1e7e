//! Credit accounting and the metered generation use-cases

pub mod generation;
pub mod ledger;

pub use generation::{GenerationService, GenerationSettings};
pub use ledger::LedgerService;

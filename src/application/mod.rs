pub mod billing;
pub mod identity;
pub mod ports;
pub mod streaming;

pub use billing::{GenerationService, GenerationSettings, LedgerService};
pub use identity::{AccountService, AuthResult, RegisterCommand};
pub use ports::{CompletionProvider, CompletionRequest, ProviderError};
pub use streaming::{Notification, NotifierConfig, StreamNotifier};

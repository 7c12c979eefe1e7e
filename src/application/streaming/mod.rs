//! Periodic server-sent notifications

pub mod notifier;

pub use notifier::{Notification, NotifierConfig, StreamNotifier};

//! Stream notifier
//!
//! Each subscriber owns its own interval timer. When the consumer drops
//! the stream (client disconnect) the timer goes with it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, Stream};
use serde::Serialize;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// Configuration for the notifier
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Delay before the first event and between events
    pub interval: Duration,
    pub message: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            message: "Tokens received".into(),
        }
    }
}

/// Payload of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
}

#[derive(Clone)]
pub struct StreamNotifier {
    config: NotifierConfig,
    live: Arc<AtomicUsize>,
}

/// Decrements the live counter when the owning stream is dropped
struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn new(live: Arc<AtomicUsize>) -> Self {
        let now = live.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(live_streams = now, "Stream opened");
        Self(live)
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        let now = self.0.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(live_streams = now, "Stream closed");
    }
}

impl StreamNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of subscriptions currently held open
    pub fn live_streams(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Endless stream yielding one notification per interval, the first
    /// one after a full interval has elapsed.
    pub fn subscribe(&self) -> impl Stream<Item = Notification> + Send + 'static {
        let period = self.config.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let guard = LiveGuard::new(self.live.clone());
        let message = self.config.message.clone();

        stream::unfold((ticker, guard), move |(mut ticker, guard)| {
            let message = message.clone();
            async move {
                ticker.tick().await;
                Some((Notification { message }, (ticker, guard)))
            }
        })
    }
}

impl Default for StreamNotifier {
    fn default() -> Self {
        Self::new(NotifierConfig::default())
    }
}

//! Cancellable tick source for the sampling loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Default time between ticks of a live loop
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Shared stop request. Cloned into the Ctrl+C handler and the terminal key
/// listener; any clone can request the stop.
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Safe to call from any thread, with or without a runtime
    pub fn request(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_requested(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once a stop has been requested
    pub async fn requested(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close here
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickWait {
    Elapsed,
    Stopped,
}

/// Waits for whichever comes first: the next tick or a stop request
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    stop: StopSignal,
}

impl Ticker {
    pub fn new(interval: Duration, stop: StopSignal) -> Self {
        Self { interval, stop }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn wait(&self) -> TickWait {
        if self.stop.is_requested() {
            return TickWait::Stopped;
        }

        tokio::select! {
            _ = tokio::time::sleep(self.interval) => TickWait::Elapsed,
            _ = self.stop.requested() => TickWait::Stopped,
        }
    }
}

//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcasts a one-shot stop request to every subscriber.
///
/// The server subscribes before it starts serving; triggering with no
/// subscribers is harmless.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. `reason` is logged.
    pub fn trigger(&self, reason: &str) {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::info!(reason, subscribers = notified, "Shutdown triggered");
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

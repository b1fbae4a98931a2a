//! Shutdown coordination for the service.
//!
//! The triggered state is sticky: a task that subscribes after the signal
//! fired still observes it, so a SIGTERM during startup is never lost.

use tokio::sync::watch;

/// Process-wide shutdown flag.
pub struct Shutdown {
    triggered: watch::Sender<bool>,
}

/// One task's view of the shutdown flag.
#[derive(Clone)]
pub struct ShutdownSignal {
    triggered: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (triggered, _) = watch::channel(false);
        Self { triggered }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            triggered: self.triggered.subscribe(),
        }
    }

    /// Flip the flag. Idempotent; works with no subscribers.
    pub fn trigger(&self) {
        self.triggered.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.triggered.borrow()
    }

    /// Number of tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.triggered.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown has been triggered, immediately if it already was.
    pub async fn recv(&mut self) {
        // An error means the coordinator was dropped; treat that as shutdown.
        let _ = self.triggered.wait_for(|triggered| *triggered).await;
    }
}

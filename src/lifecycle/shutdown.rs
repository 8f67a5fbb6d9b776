//! Shutdown coordination.

use tokio::sync::watch;

/// Handle that ends the server. Triggering it, or dropping it, releases
/// every [`ShutdownSignal`] taken from it.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// The waiting half handed to `HttpServer::run`.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Idempotent; signals taken afterwards complete immediately.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Completes once the handle is triggered or dropped.
    pub async fn wait(mut self) {
        // A closed channel means the handle is gone, which also ends the wait.
        let _ = self.rx.wait_for(|fired| *fired).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_trigger_releases_waiting_signal() {
        let shutdown = Shutdown::new();
        let waiter = tokio::spawn(shutdown.signal().wait());

        shutdown.trigger();

        assert!(timeout(WAIT, waiter).await.is_ok());
    }

    #[tokio::test]
    async fn test_signal_taken_after_trigger_completes() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();

        assert!(timeout(WAIT, shutdown.signal().wait()).await.is_ok());
    }

    #[tokio::test]
    async fn test_dropping_handle_releases_signal() {
        let shutdown = Shutdown::new();
        let signal = shutdown.signal();
        drop(shutdown);

        assert!(timeout(WAIT, signal.wait()).await.is_ok());
    }

    #[tokio::test]
    async fn test_untriggered_signal_keeps_waiting() {
        let shutdown = Shutdown::new();

        assert!(timeout(Duration::from_millis(50), shutdown.signal().wait())
            .await
            .is_err());
    }
}

//! Shutdown coordination.

use std::future::Future;
use tokio::sync::broadcast;

/// Fan-out stop signal for the server and any background task.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A future that resolves once `trigger` is called.
    ///
    /// Subscribes immediately, so a trigger issued after this call and before
    /// the future is polled is not lost.
    pub fn triggered(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    /// Signal every pending `triggered` future.
    pub fn trigger(&self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("Shutdown triggered with no listeners");
        }
    }

    /// Number of futures still waiting on the signal.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_every_listener() {
        let shutdown = Shutdown::new();
        let a = shutdown.triggered();
        let b = shutdown.triggered();
        assert_eq!(shutdown.listener_count(), 2);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), async {
            a.await;
            b.await;
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_untriggered_future_stays_pending() {
        let shutdown = Shutdown::new();
        let pending = shutdown.triggered();
        assert!(tokio::time::timeout(Duration::from_millis(20), pending)
            .await
            .is_err());
    }
}

//! Cooperative cancellation token pair.
//!
//! The controller creates a pair per request and invalidates the handle the
//! moment a superseding query is committed or the controller is torn down.
//! The backend receives the signal and may abort early, but correctness
//! never depends on it doing so: stale responses are discarded on arrival.

use tokio::sync::watch;

/// Create a connected handle/signal pair.
pub fn pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

/// The invalidating side, kept by the controller.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Mark the request as superseded. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// The observing side, handed to the in-flight request.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Whether the request has been superseded.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the request is superseded. A dropped handle counts as
    /// cancellation.
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_flips_signal() {
        let (handle, mut signal) = pair();
        assert!(!signal.is_cancelled());

        handle.cancel();
        assert!(signal.is_cancelled());
        signal.cancelled().await;
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let (handle, signal) = pair();
        handle.cancel();
        handle.cancel();
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn test_dropped_handle_counts_as_cancelled() {
        let (handle, mut signal) = pair();
        drop(handle);
        // Must resolve rather than pend forever.
        signal.cancelled().await;
    }
}

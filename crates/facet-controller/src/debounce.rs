//! Generic last-write-wins debouncing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

/// Create a debouncer and the receiving end for its committed values.
///
/// Must be called within a tokio runtime; each `submit` spawns a timer task.
pub fn channel<T: Send + 'static>(
    interval: Duration,
) -> (Debouncer<T>, mpsc::UnboundedReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        Debouncer {
            interval,
            seq: Arc::new(AtomicU64::new(0)),
            tx,
        },
        rx,
    )
}

/// Delays propagation of a rapidly changing value until it has held for the
/// configured interval.
///
/// Every `submit` restarts the interval and supersedes the pending value, so
/// intermediate values are never delivered (last write wins). There is no
/// upper bound on deferral while input keeps changing. Dropping the
/// receiver turns any late delivery into a no-op, so teardown never fires a
/// stale commit.
pub struct Debouncer<T> {
    interval: Duration,
    seq: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Submit a new value, superseding any pending one.
    pub fn submit(&self, value: T) {
        let stamp = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let seq = Arc::clone(&self.seq);
        let tx = self.tx.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            time::sleep(interval).await;
            // Only the most recent submission may deliver.
            if seq.load(Ordering::SeqCst) == stamp {
                let _ = tx.send(value);
            }
        });
    }

    /// Discard the pending value, if any, without delivering it.
    pub fn cancel(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
    }

    /// The configured stability interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_last_write_wins() {
        let (debouncer, mut rx) = channel::<&str>(INTERVAL);

        debouncer.submit("a");
        time::sleep(Duration::from_millis(50)).await;
        debouncer.submit("ab");
        time::sleep(Duration::from_millis(50)).await;
        debouncer.submit("abc");

        time::sleep(Duration::from_millis(400)).await;

        assert_eq!(rx.try_recv().ok(), Some("abc"));
        assert!(rx.try_recv().is_err(), "intermediate values must not fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_restarts_interval() {
        let (debouncer, mut rx) = channel::<&str>(INTERVAL);

        debouncer.submit("a");
        time::sleep(Duration::from_millis(200)).await;
        debouncer.submit("ab");
        time::sleep(Duration::from_millis(200)).await;

        // 400ms in, but "ab" has only been stable for 200ms.
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().ok(), Some("ab"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_value_fires_after_interval() {
        let (debouncer, mut rx) = channel::<u32>(INTERVAL);

        debouncer.submit(7);
        time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_disarms_pending_value() {
        let (debouncer, mut rx) = channel::<&str>(INTERVAL);

        debouncer.submit("a");
        debouncer.cancel();
        time::sleep(Duration::from_millis(400)).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_receiver_makes_late_fire_a_noop() {
        let (debouncer, rx) = channel::<&str>(INTERVAL);

        debouncer.submit("a");
        drop(rx);
        // The timer task must not panic when the channel is gone.
        time::sleep(Duration::from_millis(400)).await;
    }
}

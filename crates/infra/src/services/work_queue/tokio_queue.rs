use super::{IWorkQueue, WorkHandler, WorkResult};
use remindme_domain::WorkPayload;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

type PendingItems = Arc<Mutex<HashMap<String, Vec<(u64, JoinHandle<()>)>>>>;

/// In-process `IWorkQueue` backend on top of the tokio timer.
///
/// Each submitted item becomes one spawned task that sleeps for the
/// delay and then runs the registered worker. Cancellation aborts the
/// tasks registered under a tag. Items do not survive a process
/// restart; on platforms with a durable scheduler this backend is the
/// place to swap in the native facility.
pub struct TokioWorkQueue {
    worker: Arc<RwLock<Option<WorkHandler>>>,
    pending: PendingItems,
    next_seq: AtomicU64,
    retry_backoff: Duration,
}

const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(30);

impl TokioWorkQueue {
    pub fn new() -> Self {
        Self::with_retry_backoff(DEFAULT_RETRY_BACKOFF)
    }

    /// Backoff applied between runs when a worker reports
    /// `WorkResult::Retry`
    pub fn with_retry_backoff(retry_backoff: Duration) -> Self {
        Self {
            worker: Arc::new(RwLock::new(None)),
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_seq: AtomicU64::new(0),
            retry_backoff,
        }
    }
}

impl Default for TokioWorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl TokioWorkQueue {
    fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().values().map(Vec::len).sum()
    }
}

fn remove_item(pending: &PendingItems, tag: &str, seq: u64) {
    let mut pending = pending.lock().unwrap();
    if let Some(items) = pending.get_mut(tag) {
        items.retain(|(s, _)| *s != seq);
        if items.is_empty() {
            pending.remove(tag);
        }
    }
}

#[async_trait::async_trait]
impl IWorkQueue for TokioWorkQueue {
    async fn submit(
        &self,
        tag: &str,
        payload: WorkPayload,
        delay: Duration,
    ) -> anyhow::Result<()> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let worker = self.worker.clone();
        let pending = self.pending.clone();
        let task_tag = tag.to_string();
        let retry_backoff = self.retry_backoff;

        // The task deregisters itself through this same lock when it
        // finishes, so holding it across the spawn guarantees the
        // handle is recorded before a zero-delay item can complete
        let mut pending_items = self.pending.lock().unwrap();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            loop {
                let handler = { worker.read().unwrap().clone() };
                let result = match handler {
                    Some(handler) => handler(payload.clone()).await,
                    None => {
                        warn!(
                            "Work item with tag: {} fired before a worker was registered",
                            task_tag
                        );
                        WorkResult::Failure
                    }
                };
                match result {
                    WorkResult::Retry => tokio::time::sleep(retry_backoff).await,
                    WorkResult::Success | WorkResult::Failure => break,
                }
            }
            remove_item(&pending, &task_tag, seq);
        });
        pending_items
            .entry(tag.to_string())
            .or_default()
            .push((seq, handle));
        Ok(())
    }

    async fn cancel_by_tag(&self, tag: &str) {
        let items = self.pending.lock().unwrap().remove(tag);
        if let Some(items) = items {
            for (_, handle) in items {
                handle.abort();
            }
        }
    }

    fn set_worker(&self, handler: WorkHandler) {
        *self.worker.write().unwrap() = Some(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn recording_worker() -> (WorkHandler, Arc<Mutex<Vec<WorkPayload>>>) {
        let fired: Arc<Mutex<Vec<WorkPayload>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = fired.clone();
        let handler: WorkHandler = Arc::new(move |payload| {
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(payload);
                WorkResult::Success
            }
            .boxed()
        });
        (handler, fired)
    }

    fn payload_with_id(id: i64) -> WorkPayload {
        let mut payload = WorkPayload::new();
        payload.set_int("id", id);
        payload
    }

    #[tokio::test]
    async fn it_fires_after_the_delay() {
        let queue = TokioWorkQueue::new();
        let (handler, fired) = recording_worker();
        queue.set_worker(handler);

        queue
            .submit("reminder_1", payload_with_id(1), Duration::from_millis(0))
            .await
            .expect("To submit work");

        tokio::time::sleep(Duration::from_millis(100)).await;
        let fired = fired.lock().unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].get_int("id"), Some(1));
    }

    #[tokio::test]
    async fn cancel_before_fire_prevents_the_worker_from_running() {
        let queue = TokioWorkQueue::new();
        let (handler, fired) = recording_worker();
        queue.set_worker(handler);

        queue
            .submit("reminder_1", payload_with_id(1), Duration::from_millis(300))
            .await
            .expect("To submit work");
        queue.cancel_by_tag("reminder_1").await;

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submitting_twice_with_the_same_tag_fires_twice() {
        let queue = TokioWorkQueue::new();
        let (handler, fired) = recording_worker();
        queue.set_worker(handler);

        for _ in 0..2 {
            queue
                .submit("reminder_1", payload_with_id(1), Duration::from_millis(0))
                .await
                .expect("To submit work");
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn completed_items_do_not_linger_in_the_pending_set() {
        let queue = TokioWorkQueue::new();
        let (handler, fired) = recording_worker();
        queue.set_worker(handler);

        // Zero-delay items can finish as soon as they are spawned
        for i in 0..5 {
            queue
                .submit(
                    &format!("reminder_{}", i),
                    payload_with_id(i),
                    Duration::from_millis(0),
                )
                .await
                .expect("To submit work");
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.lock().unwrap().len(), 5);
        assert_eq!(queue.pending_count(), 0);
    }

    #[tokio::test]
    async fn cancelling_an_unknown_tag_is_a_noop() {
        let queue = TokioWorkQueue::new();
        queue.cancel_by_tag("reminder_404").await;
    }

    #[tokio::test]
    async fn cancelling_after_fire_is_safe() {
        let queue = TokioWorkQueue::new();
        let (handler, fired) = recording_worker();
        queue.set_worker(handler);

        queue
            .submit("reminder_1", payload_with_id(1), Duration::from_millis(0))
            .await
            .expect("To submit work");
        tokio::time::sleep(Duration::from_millis(100)).await;

        queue.cancel_by_tag("reminder_1").await;
        assert_eq!(fired.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn retry_requested_reruns_after_the_backoff() {
        let queue = TokioWorkQueue::with_retry_backoff(Duration::from_millis(20));
        let attempts = Arc::new(Mutex::new(0));
        let counter = attempts.clone();
        queue.set_worker(Arc::new(move |_| {
            let counter = counter.clone();
            async move {
                let mut attempts = counter.lock().unwrap();
                *attempts += 1;
                if *attempts == 1 {
                    WorkResult::Retry
                } else {
                    WorkResult::Success
                }
            }
            .boxed()
        }));

        queue
            .submit("reminder_1", payload_with_id(1), Duration::from_millis(0))
            .await
            .expect("To submit work");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*attempts.lock().unwrap(), 2);
    }
}

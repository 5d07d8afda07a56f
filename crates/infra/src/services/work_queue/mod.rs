mod tokio_queue;

use futures::future::BoxFuture;
use remindme_domain::WorkPayload;
use std::sync::Arc;
use std::time::Duration;
pub use tokio_queue::TokioWorkQueue;

/// Outcome a worker reports back to the work queue after an item fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkResult {
    /// Terminal, the item is consumed
    Success,
    /// Terminal, permanent failure, the item is dropped
    Failure,
    /// The queue should run the item again after a backoff
    Retry,
}

/// The process-wide worker callback invoked when an item's delay has
/// elapsed
pub type WorkHandler = Arc<dyn Fn(WorkPayload) -> BoxFuture<'static, WorkResult> + Send + Sync>;

/// A deferred-execution facility modelled after platform work
/// schedulers: one-shot, tagged, cancellable units of work with an
/// initial delay.
///
/// The contract deliberately does not promise in-process durability. A
/// backend is free to persist items and fire them after a restart, so
/// workers must rely only on the payload travelling with the item.
#[async_trait::async_trait]
pub trait IWorkQueue: Send + Sync {
    /// Registers one new pending work item. Submitting twice with the
    /// same tag yields two independent items, the queue does not
    /// deduplicate.
    async fn submit(&self, tag: &str, payload: WorkPayload, delay: Duration)
        -> anyhow::Result<()>;
    /// Cancels all outstanding items with the given tag. Idempotent
    /// and safe to call after an item already fired.
    async fn cancel_by_tag(&self, tag: &str);
    /// Registers the worker callback. Expected to be called once at
    /// startup, before any item fires.
    fn set_worker(&self, handler: WorkHandler);
}

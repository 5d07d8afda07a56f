mod work_queue;

use remindme_domain::{Reminder, ID};
pub use work_queue::WorkQueueReminderWorkRepo;

/// Scheduling boundary for reminder work: hands a reminder off to the
/// deferred work queue and cancels the work again when the reminder is
/// deleted.
///
/// From this boundary's point of view a scheduled reminder is Pending
/// until it either fires (terminal) or is cancelled (terminal). There
/// is no retry loop here, retries are purely a delivery concern.
#[async_trait::async_trait]
pub trait IReminderWorkRepo: Send + Sync {
    /// Computes the delay until the reminder's fire time and registers
    /// exactly one new pending work item for it. A fire time in the
    /// past is submitted with a zero delay and executes at the next
    /// opportunity, there is no special-casing of past times.
    ///
    /// Scheduling does not deduplicate by tag: calling this twice for
    /// the same reminder yields two independent work items unless the
    /// caller cancels in between.
    async fn schedule(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Cancels all outstanding work items for the reminder. A no-op
    /// when none exist and safe to call after the reminder fired.
    async fn cancel(&self, reminder_id: ID) -> anyhow::Result<()>;
}

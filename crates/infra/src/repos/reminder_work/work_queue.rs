use super::IReminderWorkRepo;
use crate::services::IWorkQueue;
use crate::system::ISys;
use remindme_domain::{
    date, reminder_work_tag, Reminder, WorkPayload, DESCRIPTION_KEY, ID, ID_KEY, TITLE_KEY,
};
use std::sync::Arc;
use std::time::Duration;

/// `IReminderWorkRepo` backed by an `IWorkQueue`
pub struct WorkQueueReminderWorkRepo {
    work_queue: Arc<dyn IWorkQueue>,
    sys: Arc<dyn ISys>,
}

impl WorkQueueReminderWorkRepo {
    pub fn new(work_queue: Arc<dyn IWorkQueue>, sys: Arc<dyn ISys>) -> Self {
        Self { work_queue, sys }
    }
}

/// Delay until the reminder's fire time, resolved against the local
/// zone once at the moment of the call. Fire times that already passed
/// yield a zero delay.
fn initial_delay(reminder: &Reminder, now_millis: i64) -> Duration {
    let delay_millis = date::to_epoch_millis(&reminder.fire_at) - now_millis;
    Duration::from_millis(delay_millis.max(0) as u64)
}

/// Everything the delivery worker needs has to travel in the payload,
/// the worker may run after this process is gone
fn work_payload(reminder: &Reminder) -> WorkPayload {
    let mut payload = WorkPayload::new();
    payload.set_int(ID_KEY, reminder.id.inner());
    payload.set_str(TITLE_KEY, &reminder.title);
    payload.set_str(DESCRIPTION_KEY, &reminder.description);
    payload
}

#[async_trait::async_trait]
impl IReminderWorkRepo for WorkQueueReminderWorkRepo {
    async fn schedule(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let delay = initial_delay(reminder, self.sys.get_timestamp_millis());
        self.work_queue
            .submit(
                &reminder_work_tag(reminder.id),
                work_payload(reminder),
                delay,
            )
            .await
    }

    async fn cancel(&self, reminder_id: ID) -> anyhow::Result<()> {
        self.work_queue
            .cancel_by_tag(&reminder_work_tag(reminder_id))
            .await;
        Ok(())
    }
}

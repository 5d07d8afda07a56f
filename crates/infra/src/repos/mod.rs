mod reminder;
mod reminder_work;
mod shared;

use crate::services::IWorkQueue;
use crate::system::ISys;
pub use reminder::{IReminderRepo, InMemoryReminderRepo, SqliteReminderRepo};
pub use reminder_work::{IReminderWorkRepo, WorkQueueReminderWorkRepo};
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub reminder_work: Arc<dyn IReminderWorkRepo>,
}

impl Repos {
    pub async fn create_sqlite(
        connection_string: &str,
        work_queue: Arc<dyn IWorkQueue>,
        sys: Arc<dyn ISys>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            reminders: Arc::new(SqliteReminderRepo::connect(connection_string).await?),
            reminder_work: Arc::new(WorkQueueReminderWorkRepo::new(work_queue, sys)),
        })
    }

    pub fn create_inmemory(work_queue: Arc<dyn IWorkQueue>, sys: Arc<dyn ISys>) -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            reminder_work: Arc::new(WorkQueueReminderWorkRepo::new(work_queue, sys)),
        }
    }
}

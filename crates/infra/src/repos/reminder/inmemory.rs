use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use futures::stream::{self, BoxStream, StreamExt};
use remindme_domain::{Reminder, ID};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

pub struct InMemoryReminderRepo {
    reminders: Arc<Mutex<Vec<Reminder>>>,
    next_id: AtomicI64,
    changes: broadcast::Sender<()>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            reminders: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicI64::new(1),
            changes,
        }
    }

    fn notify_changed(&self) {
        // Nobody watching is fine
        let _ = self.changes.send(());
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<ID> {
        let id = ID::try_from(self.next_id.fetch_add(1, Ordering::SeqCst))?;
        let persisted = Reminder {
            id,
            ..reminder.clone()
        };
        insert(&persisted, &self.reminders);
        self.notify_changed();
        Ok(id)
    }

    async fn find(&self, reminder_id: ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_all(&self) -> Vec<Reminder> {
        all(&self.reminders)
    }

    async fn delete(&self, reminder_id: ID) -> anyhow::Result<()> {
        delete(reminder_id, &self.reminders);
        self.notify_changed();
        Ok(())
    }

    fn watch(&self, reminder_id: ID) -> BoxStream<'static, Option<Reminder>> {
        let reminders = self.reminders.clone();
        let rx = self.changes.subscribe();
        stream::unfold((rx, true), move |(mut rx, first)| {
            let reminders = reminders.clone();
            async move {
                if !first {
                    match rx.recv().await {
                        // A lagged watcher just re-queries and skips
                        // the intermediate snapshots
                        Ok(()) | Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => return None,
                    }
                }
                Some((find(reminder_id, &reminders), (rx, false)))
            }
        })
        .boxed()
    }

    fn watch_all(&self) -> BoxStream<'static, Vec<Reminder>> {
        let reminders = self.reminders.clone();
        let rx = self.changes.subscribe();
        stream::unfold((rx, true), move |(mut rx, first)| {
            let reminders = reminders.clone();
            async move {
                if !first {
                    match rx.recv().await {
                        Ok(()) | Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => return None,
                    }
                }
                Some((all(&reminders), (rx, false)))
            }
        })
        .boxed()
    }
}

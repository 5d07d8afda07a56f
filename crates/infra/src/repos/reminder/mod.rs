mod inmemory;
mod sqlite;

use futures::stream::BoxStream;
pub use inmemory::InMemoryReminderRepo;
use remindme_domain::{Reminder, ID};
pub use sqlite::SqliteReminderRepo;

/// The durable store of reminders.
///
/// Reads come in two flavors: one-shot lookups and live watch streams.
/// A watch stream emits the current value immediately on subscribe and
/// re-emits after every store mutation; dropping the stream cancels the
/// subscription without any effect on the store. Reminders are
/// immutable once created, there is no update operation.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Inserts a reminder and returns the id the store assigned to it.
    /// The id carried by `reminder` is ignored, the store always
    /// assigns the next one, so callers cannot forge ids.
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<ID>;
    async fn find(&self, reminder_id: ID) -> Option<Reminder>;
    async fn find_all(&self) -> Vec<Reminder>;
    /// Removes the reminder if present. Deleting an id that does not
    /// exist is a no-op, not an error.
    async fn delete(&self, reminder_id: ID) -> anyhow::Result<()>;
    /// Live view of a single reminder, `None` when it does not exist
    /// (including after deletion)
    fn watch(&self, reminder_id: ID) -> BoxStream<'static, Option<Reminder>>;
    /// Live view of the full listing, in storage-natural order
    fn watch_all(&self) -> BoxStream<'static, Vec<Reminder>>;
}

use remindme_domain::{date, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub title: String,
    pub description: String,
    /// Fire time as epoch milliseconds
    pub fire_at: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            title: reminder.title,
            description: reminder.description,
            fire_at: date::to_epoch_millis(&reminder.fire_at),
        }
    }
}

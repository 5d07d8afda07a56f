use serde::{Deserialize, Serialize};

/// Id of the notification channel that all reminder notifications
/// belong to
pub const REMINDER_CHANNEL_ID: &str = "reminder_channel";

/// The channel reminder notifications are delivered on. Creation is
/// idempotent, the delivery worker ensures it exists before every
/// display attempt.
pub fn reminder_channel() -> NotificationChannel {
    NotificationChannel {
        id: REMINDER_CHANNEL_ID.to_string(),
        name: "Reminders".to_string(),
        description: "Notifications for due reminders".to_string(),
    }
}

/// A grouping that notifications must belong to before they can be
/// displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationPriority {
    Default,
    High,
}

/// What happens when the user taps the notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TapAction {
    OpenApp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifies the notification on the notification surface, equal
    /// to the id of the reminder it was delivered for
    pub id: i64,
    pub channel_id: String,
    pub title: String,
    pub body: String,
    pub priority: NotificationPriority,
    pub tap_action: TapAction,
    pub auto_dismiss: bool,
}

impl Notification {
    /// Builds the notification shown when a reminder fires: high
    /// priority, dismissed on tap, tapping reopens the application.
    pub fn for_reminder(reminder_id: i64, title: &str, body: &str) -> Self {
        Self {
            id: reminder_id,
            channel_id: REMINDER_CHANNEL_ID.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            priority: NotificationPriority::High,
            tap_action: TapAction::OpenApp,
            auto_dismiss: true,
        }
    }
}

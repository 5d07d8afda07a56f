mod inmemory;
mod webhook;

pub use inmemory::InMemoryNotifier;
use remindme_domain::{Notification, NotificationChannel};
use thiserror::Error;
pub use webhook::WebhookNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// The user has revoked notification permission at the surface
    /// level. Permanent until the user acts, never worth a retry.
    #[error("Notification permission has been revoked")]
    PermissionDenied,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// The notification surface reminders are delivered to.
///
/// A notification must belong to a channel that exists on the surface,
/// so workers call `ensure_channel` before every display attempt.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    /// Creates the channel if it does not exist yet. Idempotent.
    async fn ensure_channel(&self, channel: &NotificationChannel) -> anyhow::Result<()>;
    /// Attempts to display the notification. Refused with
    /// `NotifyError::PermissionDenied` when the user has not granted
    /// notification permission.
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

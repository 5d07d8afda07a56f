use super::{INotifier, NotifyError};
use anyhow::anyhow;
use remindme_domain::{Notification, NotificationChannel};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Notification surface that records everything in memory. Used by
/// tests and as the fallback sink when no webhook is configured.
pub struct InMemoryNotifier {
    channels: Mutex<HashSet<String>>,
    displayed: Mutex<Vec<Notification>>,
    permission_granted: AtomicBool,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashSet::new()),
            displayed: Mutex::new(Vec::new()),
            permission_granted: AtomicBool::new(true),
        }
    }

    /// Simulates the user revoking notification permission
    pub fn revoke_permission(&self) {
        self.permission_granted.store(false, Ordering::SeqCst);
    }

    /// All notifications displayed so far, in display order
    pub fn displayed(&self) -> Vec<Notification> {
        self.displayed.lock().unwrap().clone()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn ensure_channel(&self, channel: &NotificationChannel) -> anyhow::Result<()> {
        self.channels.lock().unwrap().insert(channel.id.clone());
        Ok(())
    }

    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        if !self.permission_granted.load(Ordering::SeqCst) {
            return Err(NotifyError::PermissionDenied);
        }
        if !self
            .channels
            .lock()
            .unwrap()
            .contains(&notification.channel_id)
        {
            return Err(NotifyError::Unexpected(anyhow!(
                "Unknown notification channel: {}",
                notification.channel_id
            )));
        }
        self.displayed.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

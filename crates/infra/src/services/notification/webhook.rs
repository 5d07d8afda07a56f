use super::{INotifier, NotifyError};
use anyhow::{anyhow, Context};
use remindme_domain::{Notification, NotificationChannel};
use reqwest::StatusCode;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Mutex;

const WEBHOOK_KEY_HEADER: &str = "remindme-webhook-key";

/// Delivers notifications by POSTing them to a configured receiver.
///
/// Channels are registered with the receiver once per process
/// (`POST {base}/channels`), notifications go to
/// `POST {base}/notifications`. A `401`/`403` from the receiver is
/// treated as revoked notification permission.
pub struct WebhookNotifier {
    client: reqwest::Client,
    base_url: String,
    key: String,
    created_channels: Mutex<HashSet<String>>,
}

#[derive(Serialize)]
struct ChannelBody<'a> {
    channel: &'a NotificationChannel,
}

#[derive(Serialize)]
struct NotificationBody<'a> {
    notification: &'a Notification,
}

impl WebhookNotifier {
    pub fn new(base_url: String, key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            key,
            created_channels: Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn ensure_channel(&self, channel: &NotificationChannel) -> anyhow::Result<()> {
        {
            let created = self.created_channels.lock().unwrap();
            if created.contains(&channel.id) {
                return Ok(());
            }
        }

        let res = self
            .client
            .post(format!("{}/channels", self.base_url))
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(&ChannelBody { channel })
            .send()
            .await
            .context("Failed to reach notification channel receiver")?;
        if !res.status().is_success() {
            return Err(anyhow!(
                "Notification channel receiver answered with status: {}",
                res.status()
            ));
        }

        self.created_channels
            .lock()
            .unwrap()
            .insert(channel.id.clone());
        Ok(())
    }

    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let res = self
            .client
            .post(format!("{}/notifications", self.base_url))
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(&NotificationBody { notification })
            .send()
            .await
            .context("Failed to reach notification receiver")?;

        match res.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(NotifyError::PermissionDenied)
            }
            status => Err(NotifyError::Unexpected(anyhow!(
                "Notification receiver answered with status: {}",
                status
            ))),
        }
    }
}

use remindme_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Where the webhook notifier delivers notifications to. When not
    /// set, notifications are collected in memory only.
    pub webhook_url: Option<String>,
    /// Key sent along with every webhook delivery so that the receiver
    /// can verify the sender
    pub webhook_key: String,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let webhook_url = std::env::var("NOTIFY_WEBHOOK_URL").ok();

        let webhook_key = match std::env::var("NOTIFY_WEBHOOK_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find NOTIFY_WEBHOOK_KEY environment variable. Going to create one.");
                let key = create_random_secret(16);
                info!("Webhook key was generated and set to: {}", key);
                key
            }
        };

        Self {
            port,
            webhook_url,
            webhook_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

use remindme_api::Application;
use remindme_infra::{InMemoryNotifier, RemindMeContext};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub notifier: Arc<InMemoryNotifier>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let notifier = Arc::new(InMemoryNotifier::new());
    let mut ctx = RemindMeContext::create_inmemory().with_notifier(notifier.clone());
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = tokio::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        address,
        notifier,
        client: reqwest::Client::new(),
    }
}

mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    IReminderRepo, IReminderWorkRepo, InMemoryReminderRepo, Repos, SqliteReminderRepo,
    WorkQueueReminderWorkRepo,
};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::{info, warn};

/// Holds every collaborator of the core: repositories, services, the
/// clock and the configuration. There is no ambient global lookup,
/// the context is constructed once at startup and passed by handle to
/// whoever needs it.
#[derive(Clone)]
pub struct RemindMeContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub work_queue: Arc<dyn IWorkQueue>,
    pub notifier: Arc<dyn INotifier>,
}

struct ContextParams {
    pub sqlite_connection_string: String,
}

impl RemindMeContext {
    async fn create(params: ContextParams) -> Self {
        let config = Config::new();
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let work_queue: Arc<dyn IWorkQueue> = Arc::new(TokioWorkQueue::new());
        let notifier: Arc<dyn INotifier> = match &config.webhook_url {
            Some(url) => Arc::new(WebhookNotifier::new(
                url.clone(),
                config.webhook_key.clone(),
            )),
            None => {
                warn!("No NOTIFY_WEBHOOK_URL configured. Notifications will be collected in memory only.");
                Arc::new(InMemoryNotifier::new())
            }
        };
        let repos = Repos::create_sqlite(
            &params.sqlite_connection_string,
            work_queue.clone(),
            sys.clone(),
        )
        .await
        .expect("Sqlite database path must be valid and writable");
        Self {
            repos,
            config,
            sys,
            work_queue,
            notifier,
        }
    }

    /// Context with in-memory repositories and notification sink, used
    /// by tests
    pub fn create_inmemory() -> Self {
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let work_queue: Arc<dyn IWorkQueue> = Arc::new(TokioWorkQueue::new());
        Self {
            repos: Repos::create_inmemory(work_queue.clone(), sys.clone()),
            config: Config::new(),
            sys,
            work_queue,
            notifier: Arc::new(InMemoryNotifier::new()),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn INotifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> RemindMeContext {
    RemindMeContext::create(ContextParams {
        sqlite_connection_string: get_sqlite_connection_string(),
    })
    .await
}

fn get_sqlite_connection_string() -> String {
    const DATABASE_URL: &str = "DATABASE_URL";

    std::env::var(DATABASE_URL).unwrap_or_else(|_| {
        info!(
            "Did not find {} environment variable. Falling back to an in-memory sqlite database.",
            DATABASE_URL
        );
        "sqlite::memory:".into()
    })
}

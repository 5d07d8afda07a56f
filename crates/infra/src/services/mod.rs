mod notification;
mod work_queue;

pub use notification::{INotifier, InMemoryNotifier, NotifyError, WebhookNotifier};
pub use work_queue::{IWorkQueue, TokioWorkQueue, WorkHandler, WorkResult};

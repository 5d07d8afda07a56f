use crate::shared::usecase::UseCase;
use remindme_domain::{
    reminder_channel, Notification, WorkPayload, DESCRIPTION_KEY, ID_KEY, TITLE_KEY,
};
use remindme_infra::{NotifyError, RemindMeContext};
use tracing::{error, warn};

/// Worker-side delivery of one fired reminder. Runs on the work
/// queue's background tasks and must not rely on any state from
/// scheduling time beyond the payload itself.
#[derive(Debug)]
pub struct DeliverReminderUseCase {
    pub payload: WorkPayload,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    /// The payload is missing fields or carries an invalid id. A
    /// malformed payload will never become valid, so this is permanent.
    MalformedPayload,
    /// The user revoked notification permission. Permanent until the
    /// user acts outside of this system.
    PermissionDenied,
    NotificationError,
}

#[async_trait::async_trait]
impl UseCase for DeliverReminderUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "DeliverReminder";

    async fn execute(&mut self, ctx: &RemindMeContext) -> Result<Self::Response, Self::Error> {
        let id = self.payload.get_int(ID_KEY).unwrap_or(-1);
        let (title, description) = match (
            self.payload.get_str(TITLE_KEY),
            self.payload.get_str(DESCRIPTION_KEY),
        ) {
            (Some(title), Some(description)) if id >= 0 => (title, description),
            _ => {
                error!("Dropping reminder work item with malformed payload");
                return Err(UseCaseError::MalformedPayload);
            }
        };

        ctx.notifier
            .ensure_channel(&reminder_channel())
            .await
            .map_err(|e| {
                error!("Failed to ensure reminder notification channel: {:?}", e);
                UseCaseError::NotificationError
            })?;

        let notification = Notification::for_reminder(id, title, description);
        match ctx.notifier.notify(&notification).await {
            Ok(_) => Ok(()),
            Err(NotifyError::PermissionDenied) => {
                warn!(
                    "Could not display notification for reminder with id: {}. Notification permission has been revoked.",
                    id
                );
                Err(UseCaseError::PermissionDenied)
            }
            Err(NotifyError::Unexpected(e)) => {
                error!(
                    "Failed to display notification for reminder with id: {}. Error: {:?}",
                    id, e
                );
                Err(UseCaseError::NotificationError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remindme_infra::InMemoryNotifier;
    use std::sync::Arc;

    fn payload(id: Option<i64>, title: Option<&str>, description: Option<&str>) -> WorkPayload {
        let mut payload = WorkPayload::new();
        if let Some(id) = id {
            payload.set_int(ID_KEY, id);
        }
        if let Some(title) = title {
            payload.set_str(TITLE_KEY, title);
        }
        if let Some(description) = description {
            payload.set_str(DESCRIPTION_KEY, description);
        }
        payload
    }

    #[tokio::test]
    async fn it_displays_exactly_one_notification() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let ctx = RemindMeContext::create_inmemory().with_notifier(notifier.clone());

        let mut usecase = DeliverReminderUseCase {
            payload: payload(Some(5), Some("Buy milk"), Some("")),
        };
        usecase.execute(&ctx).await.expect("Delivery to succeed");

        let displayed = notifier.displayed();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].id, 5);
        assert_eq!(displayed[0].title, "Buy milk");
        assert_eq!(displayed[0].body, "");
    }

    #[tokio::test]
    async fn a_payload_missing_the_title_is_a_permanent_failure() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let ctx = RemindMeContext::create_inmemory().with_notifier(notifier.clone());

        let mut usecase = DeliverReminderUseCase {
            payload: payload(Some(5), None, Some("")),
        };
        let res = usecase.execute(&ctx).await;

        assert_eq!(res.unwrap_err(), UseCaseError::MalformedPayload);
        assert!(notifier.displayed().is_empty());
    }

    #[tokio::test]
    async fn a_negative_id_is_a_permanent_failure() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let ctx = RemindMeContext::create_inmemory().with_notifier(notifier.clone());

        let mut usecase = DeliverReminderUseCase {
            payload: payload(Some(-1), Some("Buy milk"), Some("")),
        };
        let res = usecase.execute(&ctx).await;

        assert_eq!(res.unwrap_err(), UseCaseError::MalformedPayload);
        assert!(notifier.displayed().is_empty());
    }

    #[tokio::test]
    async fn revoked_permission_is_a_permanent_failure() {
        let notifier = Arc::new(InMemoryNotifier::new());
        notifier.revoke_permission();
        let ctx = RemindMeContext::create_inmemory().with_notifier(notifier.clone());

        let mut usecase = DeliverReminderUseCase {
            payload: payload(Some(5), Some("Buy milk"), Some("")),
        };
        let res = usecase.execute(&ctx).await;

        assert_eq!(res.unwrap_err(), UseCaseError::PermissionDenied);
        assert!(notifier.displayed().is_empty());
    }
}

use crate::reminder::deliver_reminder::DeliverReminderUseCase;
use crate::shared::usecase::execute;
use futures::FutureExt;
use remindme_infra::{RemindMeContext, WorkResult};
use std::sync::Arc;

/// Registers the delivery worker with the work queue. Every fired work
/// item ends in a terminal state after a single attempt: delivery has
/// no transient error path, so the worker never requests a retry.
pub fn start_delivery_worker(ctx: RemindMeContext) {
    let work_queue = ctx.work_queue.clone();
    work_queue.set_worker(Arc::new(move |payload| {
        let ctx = ctx.clone();
        async move {
            let usecase = DeliverReminderUseCase { payload };
            match execute(usecase, &ctx).await {
                Ok(_) => WorkResult::Success,
                // Malformed payloads and revoked permission are both
                // permanent
                Err(_) => WorkResult::Failure,
            }
        }
        .boxed()
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::create_reminder::CreateReminderUseCase;
    use crate::reminder::delete_reminder::DeleteReminderUseCase;
    use chrono::{Duration, Local};
    use remindme_infra::InMemoryNotifier;
    use std::time::Duration as StdDuration;

    /// Full pipeline: create, observe, fire, deliver, delete.
    #[tokio::test]
    async fn a_created_reminder_is_delivered_and_can_be_cleaned_up() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let ctx = RemindMeContext::create_inmemory().with_notifier(notifier.clone());
        start_delivery_worker(ctx.clone());

        let usecase = CreateReminderUseCase {
            title: "Call mom".into(),
            description: "".into(),
            fire_at: Local::now().naive_local() + Duration::milliseconds(200),
        };
        let reminder = execute(usecase, &ctx).await.expect("To create reminder");

        let listing = ctx.repos.reminders.find_all().await;
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].title, "Call mom");

        // Wait for the delay to elapse and delivery to run
        tokio::time::sleep(StdDuration::from_millis(600)).await;
        let displayed = notifier.displayed();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].id, reminder.id.inner());
        assert_eq!(displayed[0].title, "Call mom");

        let usecase = DeleteReminderUseCase {
            reminder_id: reminder.id,
        };
        execute(usecase, &ctx).await.expect("To delete reminder");
        assert!(ctx.repos.reminders.find_all().await.is_empty());

        // Cancelling after the work already fired stays error free
        assert!(ctx.repos.reminder_work.cancel(reminder.id).await.is_ok());
    }

    #[tokio::test]
    async fn cancel_before_fire_means_no_notification() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let ctx = RemindMeContext::create_inmemory().with_notifier(notifier.clone());
        start_delivery_worker(ctx.clone());

        let usecase = CreateReminderUseCase {
            title: "Water plants".into(),
            description: "".into(),
            fire_at: Local::now().naive_local() + Duration::milliseconds(400),
        };
        let reminder = execute(usecase, &ctx).await.expect("To create reminder");

        let usecase = DeleteReminderUseCase {
            reminder_id: reminder.id,
        };
        execute(usecase, &ctx).await.expect("To delete reminder");

        tokio::time::sleep(StdDuration::from_millis(800)).await;
        assert!(notifier.displayed().is_empty());
    }
}

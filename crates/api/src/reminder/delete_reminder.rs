use crate::error::RemindMeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use remindme_api_structs::delete_reminder::*;
use remindme_domain::{Reminder, ID};
use remindme_infra::RemindMeContext;
use tracing::error;

pub async fn delete_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<RemindMeContext>,
) -> Result<HttpResponse, RemindMeError> {
    let usecase = DeleteReminderUseCase {
        reminder_id: path_params.reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(RemindMeError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RemindMeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &RemindMeContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.find(self.reminder_id).await {
            Some(reminder) => {
                ctx.repos
                    .reminders
                    .delete(reminder.id)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                Ok(reminder)
            }
            None => Err(UseCaseError::NotFound(self.reminder_id)),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(CancelWorkOnReminderDeleted)]
    }
}

/// Cancels the outstanding deferred work for a deleted reminder.
/// Cancellation is best-effort: a worker that the queue already
/// dispatched may still display the notification, that race is
/// accepted.
pub struct CancelWorkOnReminderDeleted;

#[async_trait::async_trait]
impl Subscriber<DeleteReminderUseCase> for CancelWorkOnReminderDeleted {
    async fn notify(&self, reminder: &Reminder, ctx: &RemindMeContext) {
        if let Err(e) = ctx.repos.reminder_work.cancel(reminder.id).await {
            error!(
                "Failed to cancel work for reminder with id: {}. Error: {:?}",
                reminder.id, e
            );
        }
    }
}

use crate::error::RemindMeError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDateTime;
use remindme_api_structs::create_reminder::*;
use remindme_domain::{date, Reminder, ID};
use remindme_infra::RemindMeContext;
use tracing::error;

pub async fn create_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindMeContext>,
) -> Result<HttpResponse, RemindMeError> {
    let body = body.0;
    let usecase = CreateReminderUseCase {
        title: body.title,
        description: body.description.unwrap_or_default(),
        fire_at: date::from_epoch_millis(body.fire_at),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(RemindMeError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub title: String,
    pub description: String,
    pub fire_at: NaiveDateTime,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTitle,
    StorageError,
}

impl From<UseCaseError> for RemindMeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTitle => {
                Self::BadClientData("The title of a reminder cannot be blank".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &RemindMeContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::InvalidTitle);
        }

        // The store always assigns the id, so hand it the sentinel no
        // matter what the caller sent
        let reminder = Reminder {
            id: ID::UNASSIGNED,
            title: self.title.clone(),
            description: self.description.clone(),
            fire_at: self.fire_at,
        };

        let id = ctx
            .repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(Reminder { id, ..reminder })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleWorkOnReminderCreated)]
    }
}

/// Hands the freshly persisted reminder off to the deferred work
/// scheduler. Persisting and scheduling are two separate steps, a
/// reminder that could not be scheduled still exists in the store.
pub struct ScheduleWorkOnReminderCreated;

#[async_trait::async_trait]
impl Subscriber<CreateReminderUseCase> for ScheduleWorkOnReminderCreated {
    async fn notify(&self, reminder: &Reminder, ctx: &RemindMeContext) {
        if let Err(e) = ctx.repos.reminder_work.schedule(reminder).await {
            error!(
                "Failed to schedule work for reminder with id: {}. Error: {:?}",
                reminder.id, e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    #[tokio::test]
    async fn it_rejects_blank_titles() {
        let ctx = RemindMeContext::create_inmemory();
        for bad_title in ["", " ", "\t", "   \n"] {
            let mut usecase = CreateReminderUseCase {
                title: bad_title.into(),
                description: "".into(),
                fire_at: Local::now().naive_local() + Duration::minutes(1),
            };
            let res = usecase.execute(&ctx).await;
            assert_eq!(res.unwrap_err(), UseCaseError::InvalidTitle);
        }
        assert!(ctx.repos.reminders.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn it_persists_with_a_store_assigned_id() {
        let ctx = RemindMeContext::create_inmemory();
        let usecase = CreateReminderUseCase {
            title: "Call mom".into(),
            description: "".into(),
            fire_at: Local::now().naive_local() + Duration::minutes(1),
        };

        let reminder = execute(usecase, &ctx).await.expect("To create reminder");
        assert!(reminder.id.inner() > 0);

        let found = ctx
            .repos
            .reminders
            .find(reminder.id)
            .await
            .expect("Reminder to be persisted");
        assert_eq!(found, reminder);
    }

    #[tokio::test]
    async fn created_ids_are_distinct() {
        let ctx = RemindMeContext::create_inmemory();
        let mut ids = Vec::new();
        for i in 0..5 {
            let usecase = CreateReminderUseCase {
                title: format!("reminder {}", i),
                description: "".into(),
                fire_at: Local::now().naive_local() + Duration::minutes(1),
            };
            let reminder = execute(usecase, &ctx).await.expect("To create reminder");
            assert!(!ids.contains(&reminder.id));
            ids.push(reminder.id);
        }
    }
}

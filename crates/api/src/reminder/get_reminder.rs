use crate::error::RemindMeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use remindme_api_structs::get_reminder::*;
use remindme_domain::{Reminder, ID};
use remindme_infra::RemindMeContext;

pub async fn get_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<RemindMeContext>,
) -> Result<HttpResponse, RemindMeError> {
    let usecase = GetReminderUseCase {
        reminder_id: path_params.reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(RemindMeError::from)
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for RemindMeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &RemindMeContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find(self.reminder_id)
            .await
            .ok_or(UseCaseError::NotFound(self.reminder_id))
    }
}

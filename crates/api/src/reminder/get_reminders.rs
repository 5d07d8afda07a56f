use crate::error::RemindMeError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use remindme_api_structs::get_reminders::*;
use remindme_domain::Reminder;
use remindme_infra::RemindMeContext;

pub async fn get_reminders_controller(
    ctx: web::Data<RemindMeContext>,
) -> Result<HttpResponse, RemindMeError> {
    let usecase = GetRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(RemindMeError::from)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for RemindMeError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &RemindMeContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.reminders.find_all().await)
    }
}

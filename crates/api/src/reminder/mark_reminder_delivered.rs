use crate::{
    error::PlannerError,
    shared::usecase::{execute, storage_failure, UseCase},
};
use actix_web::{web, HttpResponse};
use planner_api_structs::mark_reminder_delivered::*;
use planner_domain::{CalendarEvent, Reminder, ID};
use planner_infra::PlannerContext;

pub async fn mark_reminder_delivered_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = MarkReminderDeliveredUseCase {
        reminder_id: path_params.into_inner().reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder, &res.event)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct MarkReminderDeliveredUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for PlannerError {
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

#[derive(Debug)]
pub struct UseCaseResponse {
    pub reminder: Reminder,
    pub event: CalendarEvent,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkReminderDeliveredUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkReminderDelivered";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let not_found = || UseCaseError::NotFound(self.reminder_id.clone());

        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .ok_or_else(not_found)?;
        let event = ctx
            .repos
            .events
            .find(&reminder.event_id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .ok_or_else(not_found)?;

        let marked = ctx
            .repos
            .reminders
            .mark_delivered(&reminder.id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;
        if !marked {
            return Err(not_found());
        }
        reminder.delivered = true;

        Ok(UseCaseResponse { reminder, event })
    }
}

use crate::{
    error::PlannerError,
    shared::usecase::{execute, storage_failure, UseCase},
};
use actix_web::{web, HttpResponse};
use planner_api_structs::get_event_reminders::*;
use planner_domain::{CalendarEvent, Reminder, ID};
use planner_infra::PlannerContext;

pub async fn get_event_reminders_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = GetEventRemindersUseCase {
        event_id: path_params.into_inner().event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminders, &res.event)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetEventRemindersUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub event: CalendarEvent,
    pub reminders: Vec<Reminder>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventRemindersUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventReminders";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        let reminders = ctx
            .repos
            .reminders
            .find_by_event(&event.id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;

        Ok(UseCaseResponse { event, reminders })
    }
}

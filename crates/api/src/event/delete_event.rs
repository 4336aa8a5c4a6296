use crate::{
    error::PlannerError,
    shared::usecase::{execute, storage_failure, UseCase},
};
use actix_web::{web, HttpResponse};
use planner_api_structs::delete_event::*;
use planner_domain::{CalendarEvent, ID};
use planner_infra::PlannerContext;

pub async fn delete_event_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = DeleteEventUseCase {
        event_id: path_params.into_inner().event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct DeleteEventUseCase {
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

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    /// Reminders of the event are removed together with it
    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .events
            .delete(&self.event_id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{dt, setup};
    use chrono::Duration;
    use planner_domain::{Reminder, ReminderTrigger, TimeSpan};

    #[actix_web::test]
    async fn deletes_event_and_its_reminders() {
        let ctx = setup();
        let event = CalendarEvent::new("Dentist", dt("2024-03-14T14:00"), Duration::hours(1), ctx.now());
        let reminder = Reminder::new(event.id.clone(), ReminderTrigger::MinutesBefore(30));
        ctx.repos.events.insert(&event, &[reminder.clone()]).await.unwrap();

        let mut usecase = DeleteEventUseCase {
            event_id: event.id.clone(),
        };
        assert_eq!(usecase.execute(&ctx).await, Ok(event.clone()));

        assert!(ctx.repos.reminders.find(&reminder.id).await.unwrap().is_none());
        let listed = ctx
            .repos
            .events
            .find_by_timespan(&TimeSpan::new(dt("2024-03-14T00:00"), dt("2024-03-15T00:00")))
            .await
            .unwrap();
        assert!(listed.is_empty());

        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(event.id))
        );
    }
}

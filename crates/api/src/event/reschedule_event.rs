use crate::{
    error::PlannerError,
    shared::{
        occurrences::event_conflicts,
        usecase::{execute, storage_failure, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use chrono::NaiveDateTime;
use planner_api_structs::reschedule_event::*;
use planner_domain::{CalendarEvent, EventValidationError, Occurrence, ID};
use planner_infra::PlannerContext;

pub async fn reschedule_event_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = RescheduleEventUseCase {
        event_id: path_params.into_inner().event_id,
        start: body.0.start,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.event, res.conflicts)))
        .map_err(PlannerError::from)
}

/// Drag-and-drop move of an event. Duration and recurrence are kept, a
/// recurring event moves as a whole.
#[derive(Debug)]
pub struct RescheduleEventUseCase {
    pub event_id: ID,
    pub start: NaiveDateTime,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidEvent(EventValidationError),
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::InvalidEvent(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub event: CalendarEvent,
    pub conflicts: Vec<Occurrence>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RescheduleEventUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "RescheduleEvent";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let mut event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        event
            .reschedule(self.start, ctx.now())
            .map_err(UseCaseError::InvalidEvent)?;

        let conflicts = event_conflicts(ctx, &event)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;

        ctx.repos
            .events
            .save(&event)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;

        Ok(UseCaseResponse { event, conflicts })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{dt, setup};
    use chrono::Duration;

    #[actix_web::test]
    async fn moves_event_and_reports_new_conflicts() {
        let ctx = setup();
        let now = ctx.now();
        let lunch = CalendarEvent::new("Lunch", dt("2024-03-14T12:00"), Duration::hours(1), now);
        let call = CalendarEvent::new("Call", dt("2024-03-14T15:00"), Duration::minutes(30), now);
        ctx.repos.events.insert(&lunch, &[]).await.unwrap();
        ctx.repos.events.insert(&call, &[]).await.unwrap();

        let mut usecase = RescheduleEventUseCase {
            event_id: call.id.clone(),
            start: dt("2024-03-14T12:30"),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.start, dt("2024-03-14T12:30"));
        assert_eq!(res.event.duration, Duration::minutes(30));
        assert_eq!(res.conflicts.len(), 1);
        assert_eq!(res.conflicts[0].event_id, lunch.id);

        let stored = ctx.repos.events.find(&call.id).await.unwrap().unwrap();
        assert_eq!(stored.start, dt("2024-03-14T12:30"));
    }

    #[actix_web::test]
    async fn missing_event_is_not_found() {
        let ctx = setup();
        let mut usecase = RescheduleEventUseCase {
            event_id: ID::default(),
            start: dt("2024-03-14T12:30"),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}

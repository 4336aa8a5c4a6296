use crate::{
    error::PlannerError,
    shared::{
        occurrences::event_conflicts,
        usecase::{execute, storage_failure, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDateTime};
use planner_api_structs::update_event::*;
use planner_domain::{
    CalendarEvent, EventPatch, EventValidationError, Occurrence, RecurrenceRule, ID,
};
use planner_infra::PlannerContext;

pub async fn update_event_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.into_inner().event_id,
        title: body.title,
        description: body.description,
        location: body.location,
        start: body.start,
        duration_minutes: body.duration_minutes,
        recurrence: body.recurrence,
        remove_recurrence: body.remove_recurrence.unwrap_or(false),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.event, res.conflicts)))
        .map_err(PlannerError::from)
}

#[derive(Debug, Default)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub duration_minutes: Option<i64>,
    pub recurrence: Option<RecurrenceRule>,
    pub remove_recurrence: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidEvent(EventValidationError),
    AmbiguousRecurrence,
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
            UseCaseError::AmbiguousRecurrence => Self::BadClientData(
                "A recurrence cannot be set and removed in the same update".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub event: CalendarEvent,
    pub conflicts: Vec<Occurrence>,
}

impl UpdateEventUseCase {
    fn patch(&mut self) -> Result<EventPatch, UseCaseError> {
        let recurrence = match (self.recurrence, self.remove_recurrence) {
            (Some(_), true) => return Err(UseCaseError::AmbiguousRecurrence),
            (Some(rule), false) => Some(Some(rule)),
            (None, true) => Some(None),
            (None, false) => None,
        };
        let duration = match self.duration_minutes {
            Some(minutes) => Some(Duration::try_minutes(minutes).ok_or(
                UseCaseError::InvalidEvent(EventValidationError::DurationOutOfRange),
            )?),
            None => None,
        };
        Ok(EventPatch {
            title: self.title.take(),
            description: self.description.take(),
            location: self.location.take(),
            start: self.start,
            duration,
            recurrence,
        })
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let patch = self.patch()?;

        let mut event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        event
            .apply(patch, ctx.now())
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
    use planner_domain::{Frequency, RecurrenceEnd};

    async fn stored_event(ctx: &PlannerContext) -> CalendarEvent {
        let mut event = CalendarEvent::new(
            "Standup",
            dt("2024-03-14T09:00"),
            Duration::minutes(15),
            dt("2024-03-01T00:00"),
        );
        event.set_location(Some("Room 1".into()));
        event.recurrence = Some(RecurrenceRule::new(Frequency::Daily));
        ctx.repos.events.insert(&event, &[]).await.unwrap();
        event
    }

    #[actix_web::test]
    async fn updates_only_the_given_fields() {
        let ctx = setup();
        let event = stored_event(&ctx).await;

        let mut usecase = UpdateEventUseCase {
            event_id: event.id.clone(),
            title: Some("Daily sync".into()),
            location: Some("".into()),
            duration_minutes: Some(30),
            ..Default::default()
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.title, "Daily sync");
        assert_eq!(res.event.location, None);
        assert_eq!(res.event.duration, Duration::minutes(30));
        assert_eq!(res.event.start, event.start);
        assert_eq!(res.event.recurrence, event.recurrence);
        assert_eq!(res.event.updated, dt("2024-03-13T10:00"));
        // The stored version of the same event is not a conflict
        assert!(res.conflicts.is_empty());

        let stored = ctx.repos.events.find(&event.id).await.unwrap().unwrap();
        assert_eq!(stored, res.event);
    }

    #[actix_web::test]
    async fn removes_recurrence() {
        let ctx = setup();
        let event = stored_event(&ctx).await;

        let mut usecase = UpdateEventUseCase {
            event_id: event.id.clone(),
            remove_recurrence: true,
            ..Default::default()
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.recurrence, None);

        let mut usecase = UpdateEventUseCase {
            event_id: event.id.clone(),
            remove_recurrence: true,
            recurrence: Some(RecurrenceRule::new(Frequency::Weekly)),
            ..Default::default()
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::AmbiguousRecurrence
        );
    }

    #[actix_web::test]
    async fn invalid_patch_leaves_event_untouched() {
        let ctx = setup();
        let event = stored_event(&ctx).await;

        let mut usecase = UpdateEventUseCase {
            event_id: event.id.clone(),
            title: Some("Renamed".into()),
            recurrence: Some(
                RecurrenceRule::new(Frequency::Daily)
                    .with_end(RecurrenceEnd::Until(dt("2024-03-01T00:00"))),
            ),
            ..Default::default()
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidEvent(
                EventValidationError::UntilBeforeStart { .. }
            ))
        ));
        let stored = ctx.repos.events.find(&event.id).await.unwrap().unwrap();
        assert_eq!(stored, event);
    }

    #[actix_web::test]
    async fn missing_event_is_not_found() {
        let ctx = setup();
        let mut usecase = UpdateEventUseCase {
            title: Some("Renamed".into()),
            ..Default::default()
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}

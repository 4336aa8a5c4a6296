use crate::error::PlannerError;
use crate::shared::{
    occurrences::event_conflicts,
    usecase::{execute, storage_failure, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDateTime};
use planner_api_structs::create_event::*;
use planner_domain::{
    CalendarEvent, EventValidationError, Occurrence, RecurrenceRule, Reminder, ReminderTrigger,
};
use planner_infra::PlannerContext;

pub async fn create_event_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let body = body.0;
    let usecase = CreateEventUseCase {
        title: body.title,
        description: body.description,
        location: body.location,
        start: body.start,
        duration_minutes: body.duration_minutes,
        recurrence: body.recurrence,
        reminders: body.reminders,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.event, res.conflicts)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    pub recurrence: Option<RecurrenceRule>,
    pub reminders: Vec<ReminderTrigger>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidEvent(EventValidationError),
    InvalidReminder,
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEvent(e) => Self::BadClientData(e.to_string()),
            UseCaseError::InvalidReminder => {
                Self::BadClientData("Invalid reminder specified for the event".into())
            }
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
impl UseCase for CreateEventUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let duration = Duration::try_minutes(self.duration_minutes).ok_or(
            UseCaseError::InvalidEvent(EventValidationError::DurationOutOfRange),
        )?;
        let mut event = CalendarEvent::new(&self.title, self.start, duration, ctx.now());
        event.set_description(self.description.take());
        event.set_location(self.location.take());
        event.recurrence = self.recurrence;
        event.validate().map_err(UseCaseError::InvalidEvent)?;

        if !self.reminders.iter().all(|trigger| trigger.is_valid()) {
            return Err(UseCaseError::InvalidReminder);
        }
        let reminders = self
            .reminders
            .iter()
            .map(|trigger| Reminder::new(event.id.clone(), *trigger))
            .collect::<Vec<_>>();

        let conflicts = event_conflicts(ctx, &event)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;

        ctx.repos
            .events
            .insert(&event, &reminders)
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

    fn usecase(title: &str, start: &str, minutes: i64) -> CreateEventUseCase {
        CreateEventUseCase {
            title: title.into(),
            description: None,
            location: None,
            start: dt(start),
            duration_minutes: minutes,
            recurrence: None,
            reminders: vec![],
        }
    }

    #[actix_web::test]
    async fn creates_event_without_recurrence() {
        let ctx = setup();
        let mut usecase = usecase("Dentist", "2024-03-14T14:00", 45);
        usecase.location = Some("  Clinic ".into());
        usecase.reminders = vec![ReminderTrigger::MinutesBefore(30)];

        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.conflicts.is_empty());
        assert_eq!(res.event.location, Some("Clinic".into()));
        assert_eq!(res.event.created, dt("2024-03-13T10:00"));

        let stored = ctx.repos.events.find(&res.event.id).await.unwrap();
        assert_eq!(stored, Some(res.event.clone()));
        let reminders = ctx.repos.reminders.find_by_event(&res.event.id).await.unwrap();
        assert_eq!(reminders.len(), 1);
    }

    #[actix_web::test]
    async fn creates_event_with_recurrence() {
        let ctx = setup();
        let mut usecase = usecase("Standup", "2024-03-18T09:00", 15);
        usecase.recurrence = Some(RecurrenceRule::new(Frequency::Weekly));

        let res = usecase.execute(&ctx).await;
        assert!(res.is_ok());
    }

    #[actix_web::test]
    async fn reports_conflicts_but_still_saves() {
        let ctx = setup();
        let first = usecase("Meeting", "2024-03-14T14:00", 60)
            .execute(&ctx)
            .await
            .unwrap();

        let touching = usecase("Call", "2024-03-14T15:00", 30)
            .execute(&ctx)
            .await
            .unwrap();
        assert!(touching.conflicts.is_empty());

        let overlapping = usecase("Lunch", "2024-03-14T14:30", 60)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(overlapping.conflicts.len(), 2);
        assert_eq!(overlapping.conflicts[0].event_id, first.event.id);
        assert!(ctx
            .repos
            .events
            .find(&overlapping.event.id)
            .await
            .unwrap()
            .is_some());
    }

    #[actix_web::test]
    async fn rejects_invalid_events() {
        let ctx = setup();

        let res = usecase("   ", "2024-03-14T14:00", 60).execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidEvent(EventValidationError::EmptyTitle)
        );

        let res = usecase("Meeting", "2024-03-14T14:00", -5).execute(&ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidEvent(EventValidationError::NegativeDuration)
        );

        let mut invalid = usecase("Meeting", "2024-03-14T14:00", 60);
        invalid.recurrence =
            Some(RecurrenceRule::new(Frequency::Daily).with_end(RecurrenceEnd::Count(0)));
        assert!(invalid.execute(&ctx).await.is_err());

        let mut invalid = usecase("Meeting", "2024-03-14T14:00", 60);
        invalid.reminders = vec![ReminderTrigger::MinutesBefore(-1)];
        assert_eq!(
            invalid.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidReminder
        );

        let events = ctx
            .repos
            .events
            .search("Meeting")
            .await
            .unwrap();
        assert!(events.is_empty());
    }
}

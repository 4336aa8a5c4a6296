use crate::{
    error::PlannerError,
    shared::{
        occurrences::event_conflicts,
        usecase::{execute, storage_failure, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use planner_api_structs::quick_create_event::*;
use planner_domain::{
    nlp::{parse_event, ParseFailure},
    CalendarEvent, EventValidationError, Occurrence, Reminder, ReminderTrigger,
};
use planner_infra::PlannerContext;

pub async fn quick_create_event_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = QuickCreateEventUseCase { text: body.0.text };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.event, res.conflicts)))
        .map_err(PlannerError::from)
}

/// Parses the text and stores the resulting event together with the
/// reminder it may ask for
#[derive(Debug)]
pub struct QuickCreateEventUseCase {
    pub text: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    Unparsable(ParseFailure),
    InvalidEvent(EventValidationError),
    InvalidReminder,
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Unparsable(e) => e.into(),
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
impl UseCase for QuickCreateEventUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "QuickCreateEvent";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.now();
        let draft = parse_event(&self.text, now).map_err(UseCaseError::Unparsable)?;
        let event = draft.to_event(now);
        event.validate().map_err(UseCaseError::InvalidEvent)?;

        let mut reminders = Vec::new();
        if let Some(minutes) = draft.reminder_minutes_before {
            let trigger = ReminderTrigger::MinutesBefore(minutes);
            if !trigger.is_valid() {
                return Err(UseCaseError::InvalidReminder);
            }
            reminders.push(Reminder::new(event.id.clone(), trigger));
        }

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
    use chrono::Duration;
    use planner_domain::{Frequency, RecurrenceRule};

    #[actix_web::test]
    async fn creates_recurring_event_with_reminder() {
        let ctx = setup();
        let mut usecase = QuickCreateEventUseCase {
            text: "Weekly standup every Monday at 9am remind me 10 minutes before".into(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.title, "Weekly standup");
        assert_eq!(res.event.start, dt("2024-03-18T09:00"));
        assert_eq!(res.event.duration, Duration::hours(1));
        assert_eq!(
            res.event.recurrence,
            Some(RecurrenceRule::new(Frequency::Weekly))
        );

        let reminders = ctx.repos.reminders.find_by_event(&res.event.id).await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].trigger, ReminderTrigger::MinutesBefore(10));
    }

    #[actix_web::test]
    async fn unparsable_text_stores_nothing() {
        let ctx = setup();
        let mut usecase = QuickCreateEventUseCase {
            text: "remember the milk".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::Unparsable(ParseFailure::NoTemporalPhrase { .. }))
        ));
        assert!(ctx.repos.events.search("milk").await.unwrap().is_empty());
    }
}

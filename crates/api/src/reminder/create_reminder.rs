use crate::{
    error::PlannerError,
    shared::usecase::{execute, storage_failure, UseCase},
};
use actix_web::{web, HttpResponse};
use planner_api_structs::create_reminder::*;
use planner_domain::{CalendarEvent, Reminder, ReminderTrigger, ID};
use planner_infra::PlannerContext;

pub async fn create_reminder_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = CreateReminderUseCase {
        event_id: path_params.into_inner().event_id,
        trigger: body.0.trigger,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.reminder, &res.event)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub event_id: ID,
    pub trigger: ReminderTrigger,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidReminder,
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::InvalidReminder => {
                Self::BadClientData("Invalid reminder specified for the event".into())
            }
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
impl UseCase for CreateReminderUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        if !self.trigger.is_valid() {
            return Err(UseCaseError::InvalidReminder);
        }

        let event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        let reminder = Reminder::new(event.id.clone(), self.trigger);
        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;

        Ok(UseCaseResponse { reminder, event })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{dt, setup};
    use chrono::Duration;

    #[actix_web::test]
    async fn adds_reminder_to_event() {
        let ctx = setup();
        let event = CalendarEvent::new("Flight", dt("2024-03-20T07:00"), Duration::hours(3), ctx.now());
        ctx.repos.events.insert(&event, &[]).await.unwrap();

        let mut usecase = CreateReminderUseCase {
            event_id: event.id.clone(),
            trigger: ReminderTrigger::At(dt("2024-03-19T20:00")),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.reminder.remind_at(&res.event), dt("2024-03-19T20:00"));

        let stored = ctx.repos.reminders.find_by_event(&event.id).await.unwrap();
        assert_eq!(stored, vec![res.reminder]);
    }

    #[actix_web::test]
    async fn rejects_invalid_reminders_and_unknown_events() {
        let ctx = setup();
        let mut usecase = CreateReminderUseCase {
            event_id: ID::default(),
            trigger: ReminderTrigger::MinutesBefore(15),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));

        let mut usecase = CreateReminderUseCase {
            event_id: ID::default(),
            trigger: ReminderTrigger::MinutesBefore(-15),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidReminder)
        ));
    }
}

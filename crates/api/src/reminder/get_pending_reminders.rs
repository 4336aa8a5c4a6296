use crate::{
    error::PlannerError,
    shared::usecase::{execute, storage_failure, UseCase},
};
use actix_web::{web, HttpResponse};
use planner_api_structs::{dtos::PendingReminderDTO, get_pending_reminders::*};
use planner_infra::PlannerContext;
use std::collections::HashMap;

pub async fn get_pending_reminders_controller(
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    execute(GetPendingRemindersUseCase {}, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse { reminders }))
        .map_err(PlannerError::from)
}

/// Undelivered reminders whose time has come, oldest first. Nothing is
/// marked as delivered here.
#[derive(Debug)]
pub struct GetPendingRemindersUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPendingRemindersUseCase {
    type Response = Vec<PendingReminderDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPendingReminders";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.now();
        let reminders = ctx
            .repos
            .reminders
            .find_undelivered()
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;

        let mut event_ids = reminders
            .iter()
            .map(|r| r.event_id.clone())
            .collect::<Vec<_>>();
        event_ids.sort();
        event_ids.dedup();
        let events = ctx
            .repos
            .events
            .find_many(&event_ids)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect::<HashMap<_, _>>();

        let mut pending = reminders
            .into_iter()
            .filter_map(|reminder| {
                let event = events.get(&reminder.event_id)?;
                if reminder.is_due(event, now) {
                    Some(PendingReminderDTO::new(reminder, event))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        pending.sort_by_key(|p| p.reminder.remind_at);

        Ok(pending)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{dt, setup};
    use chrono::Duration;
    use planner_domain::{CalendarEvent, Reminder, ReminderTrigger};

    #[actix_web::test]
    async fn returns_due_reminders_with_event_title() {
        let ctx = setup();
        let now = ctx.now();
        let soon = CalendarEvent::new("Standup", dt("2024-03-13T10:10"), Duration::minutes(15), now);
        let later = CalendarEvent::new("Lunch", dt("2024-03-13T12:00"), Duration::hours(1), now);
        let due = Reminder::new(soon.id.clone(), ReminderTrigger::MinutesBefore(15));
        let early = Reminder::new(later.id.clone(), ReminderTrigger::At(dt("2024-03-13T09:00")));
        let not_yet = Reminder::new(later.id.clone(), ReminderTrigger::MinutesBefore(30));
        ctx.repos.events.insert(&soon, &[due.clone()]).await.unwrap();
        ctx.repos
            .events
            .insert(&later, &[early.clone(), not_yet])
            .await
            .unwrap();

        let pending = GetPendingRemindersUseCase {}.execute(&ctx).await.unwrap();
        let ids = pending.iter().map(|p| p.reminder.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids, vec![early.id.clone(), due.id.clone()]);
        assert_eq!(pending[0].event_title, "Lunch");
        assert_eq!(pending[1].reminder.remind_at, dt("2024-03-13T09:55"));

        ctx.repos.reminders.mark_delivered(&early.id).await.unwrap();
        let pending = GetPendingRemindersUseCase {}.execute(&ctx).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].reminder.id, due.id);
    }
}

use crate::{
    error::PlannerError,
    shared::{
        occurrences::event_conflicts,
        usecase::{execute, storage_failure, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use planner_api_structs::get_event_conflicts::*;
use planner_domain::{Occurrence, ID};
use planner_infra::PlannerContext;

pub async fn get_event_conflicts_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = GetEventConflictsUseCase {
        event_id: path_params.into_inner().event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|conflicts| HttpResponse::Ok().json(APIResponse { conflicts }))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetEventConflictsUseCase {
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
impl UseCase for GetEventConflictsUseCase {
    type Response = Vec<Occurrence>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventConflicts";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        event_conflicts(ctx, &event)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{dt, setup};
    use chrono::Duration;
    use planner_domain::{CalendarEvent, Frequency, RecurrenceRule};

    #[actix_web::test]
    async fn open_ended_recurrence_is_checked_within_lookahead() {
        let ctx = setup();
        let now = ctx.now();
        let mut standup = CalendarEvent::new("Standup", dt("2024-03-14T09:00"), Duration::minutes(30), now);
        standup.recurrence = Some(RecurrenceRule::new(Frequency::Daily));
        let review = CalendarEvent::new("Review", dt("2024-03-20T09:15"), Duration::minutes(30), now);
        let far = CalendarEvent::new("Offsite", dt("2025-03-20T09:00"), Duration::hours(8), now);
        for e in [&standup, &review, &far] {
            ctx.repos.events.insert(e, &[]).await.unwrap();
        }

        let mut usecase = GetEventConflictsUseCase {
            event_id: standup.id.clone(),
        };
        let conflicts = usecase.execute(&ctx).await.unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].event_id, review.id);

        let mut usecase = GetEventConflictsUseCase {
            event_id: review.id.clone(),
        };
        let conflicts = usecase.execute(&ctx).await.unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].start, dt("2024-03-20T09:00"));
    }
}

use crate::{
    error::PlannerError,
    shared::usecase::{execute, storage_failure, UseCase},
};
use actix_web::{web, HttpResponse};
use planner_api_structs::get_events::*;
use planner_domain::{CalendarEvent, TimeSpan};
use planner_infra::PlannerContext;

pub async fn get_events_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = GetEventsUseCase {
        timespan: query_params.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetEventsUseCase {
    pub timespan: QueryParams,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The provided start and end is invalid".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = Vec<CalendarEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let timespan = TimeSpan::create(self.timespan.start, self.timespan.end)
            .map_err(|_| UseCaseError::InvalidTimespan)?;

        ctx.repos
            .events
            .find_by_timespan(&timespan)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{dt, setup};
    use chrono::Duration;
    use planner_domain::{Frequency, RecurrenceRule};

    #[actix_web::test]
    async fn lists_events_that_may_occur_in_range() {
        let ctx = setup();
        let now = ctx.now();
        let mut weekly = CalendarEvent::new("Standup", dt("2024-01-01T09:00"), Duration::minutes(15), now);
        weekly.recurrence = Some(RecurrenceRule::new(Frequency::Weekly));
        let single = CalendarEvent::new("Dentist", dt("2024-03-14T14:00"), Duration::hours(1), now);
        let past = CalendarEvent::new("Old", dt("2024-02-01T14:00"), Duration::hours(1), now);
        for e in [&weekly, &single, &past] {
            ctx.repos.events.insert(e, &[]).await.unwrap();
        }

        let mut usecase = GetEventsUseCase {
            timespan: QueryParams {
                start: dt("2024-03-14T00:00"),
                end: dt("2024-03-15T00:00"),
            },
        };
        let events = usecase.execute(&ctx).await.unwrap();
        assert_eq!(events, vec![weekly, single]);
    }

    #[actix_web::test]
    async fn rejects_reversed_range() {
        let ctx = setup();
        let mut usecase = GetEventsUseCase {
            timespan: QueryParams {
                start: dt("2024-03-15T00:00"),
                end: dt("2024-03-14T00:00"),
            },
        };
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidTimespan)
        );
    }
}

use crate::{
    error::PlannerError,
    shared::{
        occurrences::{occurrences_in, query_timespan, TimeSpanError},
        usecase::{execute, storage_failure, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use planner_api_structs::get_instances::*;
use planner_domain::Occurrence;
use planner_infra::PlannerContext;

pub async fn get_instances_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = GetInstancesUseCase {
        timespan: query_params.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|instances| HttpResponse::Ok().json(APIResponse { instances }))
        .map_err(PlannerError::from)
}

/// Occurrences of all events in a range, the calendar view
#[derive(Debug)]
pub struct GetInstancesUseCase {
    pub timespan: QueryParams,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimespan(TimeSpanError),
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimespan(TimeSpanError::Invalid) => {
                Self::BadClientData("The provided start and end is invalid".into())
            }
            UseCaseError::InvalidTimespan(TimeSpanError::TooLong) => {
                Self::BadClientData("The provided time span is too long".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetInstancesUseCase {
    type Response = Vec<Occurrence>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetInstances";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let timespan = query_timespan(
            self.timespan.start,
            self.timespan.end,
            ctx.config.event_instances_query_duration_limit,
        )
        .map_err(UseCaseError::InvalidTimespan)?;

        occurrences_in(ctx, &timespan, None)
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
    async fn merges_occurrences_of_all_events() {
        let ctx = setup();
        let now = ctx.now();
        let mut daily = CalendarEvent::new("Gym", dt("2024-03-01T18:00"), Duration::hours(1), now);
        daily.recurrence = Some(RecurrenceRule::new(Frequency::Daily));
        let single = CalendarEvent::new("Dentist", dt("2024-03-14T14:00"), Duration::hours(1), now);
        ctx.repos.events.insert(&daily, &[]).await.unwrap();
        ctx.repos.events.insert(&single, &[]).await.unwrap();

        let mut usecase = GetInstancesUseCase {
            timespan: QueryParams {
                start: dt("2024-03-14T00:00"),
                end: dt("2024-03-15T23:59"),
            },
        };
        let starts = usecase
            .execute(&ctx)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.start)
            .collect::<Vec<_>>();
        assert_eq!(
            starts,
            vec![
                dt("2024-03-14T14:00"),
                dt("2024-03-14T18:00"),
                dt("2024-03-15T18:00")
            ]
        );
    }

    #[actix_web::test]
    async fn rejects_too_long_ranges() {
        let ctx = setup();
        let mut usecase = GetInstancesUseCase {
            timespan: QueryParams {
                start: dt("2024-01-01T00:00"),
                end: dt("2025-01-01T00:00"),
            },
        };
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidTimespan(TimeSpanError::TooLong))
        );
    }
}

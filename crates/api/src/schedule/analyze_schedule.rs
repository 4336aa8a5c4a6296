use crate::{
    error::PlannerError,
    shared::{
        occurrences::{occurrences_in, query_timespan, TimeSpanError},
        usecase::{execute, storage_failure, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use planner_api_structs::analyze_schedule::*;
use planner_domain::time_block::{analyze_schedule, ScheduleAnalysis};
use planner_infra::PlannerContext;

pub async fn analyze_schedule_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = AnalyzeScheduleUseCase {
        timespan: query_params.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|analysis| HttpResponse::Ok().json(analysis))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct AnalyzeScheduleUseCase {
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
impl UseCase for AnalyzeScheduleUseCase {
    type Response = ScheduleAnalysis;

    type Error = UseCaseError;

    const NAME: &'static str = "AnalyzeSchedule";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let timespan = query_timespan(
            self.timespan.start,
            self.timespan.end,
            ctx.config.event_instances_query_duration_limit,
        )
        .map_err(UseCaseError::InvalidTimespan)?;

        let occurrences = occurrences_in(ctx, &timespan, None)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;

        Ok(analyze_schedule(&occurrences))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{dt, setup};
    use chrono::Duration;
    use planner_domain::CalendarEvent;

    #[actix_web::test]
    async fn reports_conflicts_and_overloaded_days() {
        let ctx = setup();
        let now = ctx.now();
        let a = CalendarEvent::new("A", dt("2024-03-14T09:00"), Duration::hours(1), now);
        let b = CalendarEvent::new("B", dt("2024-03-14T09:30"), Duration::hours(1), now);
        ctx.repos.events.insert(&a, &[]).await.unwrap();
        ctx.repos.events.insert(&b, &[]).await.unwrap();
        for hour in 8..16 {
            let start = dt("2024-03-15T00:00") + Duration::hours(hour);
            let e = CalendarEvent::new("Slot", start, Duration::minutes(30), now);
            ctx.repos.events.insert(&e, &[]).await.unwrap();
        }

        let mut usecase = AnalyzeScheduleUseCase {
            timespan: QueryParams {
                start: dt("2024-03-14T00:00"),
                end: dt("2024-03-16T00:00"),
            },
        };
        let analysis = usecase.execute(&ctx).await.unwrap();
        assert_eq!(analysis.conflicts.len(), 1);
        assert_eq!(analysis.conflicts[0].overlap_start, dt("2024-03-14T09:30"));
        assert_eq!(analysis.conflicts[0].overlap_end, dt("2024-03-14T10:00"));
        assert_eq!(analysis.overloaded_days.len(), 1);
        assert_eq!(analysis.overloaded_days[0].occurrences, 8);
    }
}

use crate::{
    error::PlannerError,
    shared::{
        occurrences::{occurrences_in, query_timespan, TimeSpanError},
        usecase::{execute, storage_failure, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use planner_api_structs::get_time_slots::*;
use planner_domain::time_block::{suggest_slots, FreeSlot, SlotQuery, TimeWindow};
use planner_infra::PlannerContext;

pub async fn get_time_slots_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let body = body.0;
    let usecase = GetTimeSlotsUseCase {
        start: body.start,
        end: body.end,
        duration_minutes: body.duration_minutes,
        preferred_start: body.preferred_start,
        preferred_end: body.preferred_end,
    };

    execute(usecase, &ctx)
        .await
        .map(|slots| HttpResponse::Ok().json(APIResponse { slots }))
        .map_err(PlannerError::from)
}

/// Free slots between the stored occurrences inside working hours
#[derive(Debug)]
pub struct GetTimeSlotsUseCase {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    pub preferred_start: Option<NaiveTime>,
    pub preferred_end: Option<NaiveTime>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimespan(TimeSpanError),
    InvalidDuration(i64),
    InvalidPreferredWindow,
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
            UseCaseError::InvalidDuration(minutes) => Self::BadClientData(format!(
                "The requested duration of {} minutes is invalid",
                minutes
            )),
            UseCaseError::InvalidPreferredWindow => Self::BadClientData(
                "The preferred window needs both a start and a later end".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl GetTimeSlotsUseCase {
    fn preferred(&self) -> Result<Option<TimeWindow>, UseCaseError> {
        match (self.preferred_start, self.preferred_end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) if start < end => Ok(Some(TimeWindow { start, end })),
            _ => Err(UseCaseError::InvalidPreferredWindow),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTimeSlotsUseCase {
    type Response = Vec<FreeSlot>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTimeSlots";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let timespan = query_timespan(
            self.start,
            self.end,
            ctx.config.time_slots_query_duration_limit,
        )
        .map_err(UseCaseError::InvalidTimespan)?;
        let duration = Duration::try_minutes(self.duration_minutes)
            .filter(|d| *d > Duration::zero())
            .ok_or(UseCaseError::InvalidDuration(self.duration_minutes))?;
        let preferred = self.preferred()?;

        let occurrences = occurrences_in(ctx, &timespan, None)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;

        let query = SlotQuery {
            timespan,
            duration,
            preferred,
            working_hours: ctx.config.working_hours,
        };
        Ok(suggest_slots(&occurrences, &query))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_context::{dt, setup};
    use planner_domain::{time_block::WorkingHours, CalendarEvent};

    fn usecase(minutes: i64) -> GetTimeSlotsUseCase {
        GetTimeSlotsUseCase {
            start: dt("2024-03-14T00:00"),
            end: dt("2024-03-14T23:59"),
            duration_minutes: minutes,
            preferred_start: None,
            preferred_end: None,
        }
    }

    #[actix_web::test]
    async fn finds_gaps_around_stored_events() {
        let mut ctx = setup();
        ctx.config.working_hours = WorkingHours::default();
        let now = ctx.now();
        for start in ["2024-03-14T09:00", "2024-03-14T11:00"] {
            let event = CalendarEvent::new("Busy", dt(start), Duration::hours(1), now);
            ctx.repos.events.insert(&event, &[]).await.unwrap();
        }

        let slots = usecase(90).execute(&ctx).await.unwrap();
        assert_eq!(
            slots,
            vec![FreeSlot {
                start: dt("2024-03-14T12:00"),
                end: dt("2024-03-14T20:00"),
            }]
        );

        let mut with_preference = usecase(60);
        with_preference.preferred_start = NaiveTime::from_hms_opt(10, 0, 0);
        with_preference.preferred_end = NaiveTime::from_hms_opt(10, 30, 0);
        let slots = with_preference.execute(&ctx).await.unwrap();
        let starts = slots.iter().map(|s| s.start).collect::<Vec<_>>();
        assert_eq!(
            starts,
            vec![
                dt("2024-03-14T10:00"),
                dt("2024-03-14T08:00"),
                dt("2024-03-14T12:00")
            ]
        );
    }

    #[actix_web::test]
    async fn rejects_invalid_input() {
        let ctx = setup();
        assert_eq!(
            usecase(0).execute(&ctx).await,
            Err(UseCaseError::InvalidDuration(0))
        );

        let mut half_window = usecase(30);
        half_window.preferred_start = NaiveTime::from_hms_opt(10, 0, 0);
        assert_eq!(
            half_window.execute(&ctx).await,
            Err(UseCaseError::InvalidPreferredWindow)
        );

        let mut too_long = usecase(30);
        too_long.end = dt("2024-06-01T00:00");
        assert_eq!(
            too_long.execute(&ctx).await,
            Err(UseCaseError::InvalidTimespan(TimeSpanError::TooLong))
        );
    }
}

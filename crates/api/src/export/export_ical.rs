use crate::{
    error::PlannerError,
    shared::{
        occurrences::{query_timespan, TimeSpanError},
        usecase::{execute, storage_failure, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use planner_api_structs::export_ical::*;
use planner_domain::export::{render_calendar, ExportEntry};
use planner_infra::PlannerContext;

pub async fn export_ical_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = ExportICalUseCase {
        timespan: query_params.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|calendar| HttpResponse::Ok().content_type(CONTENT_TYPE).body(calendar))
        .map_err(PlannerError::from)
}

/// Renders every occurrence in the range as an iCalendar document.
/// Read only.
#[derive(Debug)]
pub struct ExportICalUseCase {
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
impl UseCase for ExportICalUseCase {
    type Response = String;

    type Error = UseCaseError;

    const NAME: &'static str = "ExportICal";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let timespan = query_timespan(
            self.timespan.start,
            self.timespan.end,
            ctx.config.event_instances_query_duration_limit,
        )
        .map_err(UseCaseError::InvalidTimespan)?;

        let events = ctx
            .repos
            .events
            .find_by_timespan(&timespan)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?;

        let mut entries = events
            .iter()
            .flat_map(|event| {
                event
                    .expand(&timespan)
                    .map(move |occurrence| ExportEntry::new(event, occurrence))
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| {
            (a.occurrence.start, &a.occurrence.event_id)
                .cmp(&(b.occurrence.start, &b.occurrence.event_id))
        });

        Ok(render_calendar(&entries, ctx.sys.get_utc_now()))
    }
}

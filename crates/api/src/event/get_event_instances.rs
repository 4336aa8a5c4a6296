use crate::{
    error::PlannerError,
    shared::{
        occurrences::{query_timespan, TimeSpanError},
        usecase::{execute, storage_failure, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use planner_api_structs::get_event_instances::*;
use planner_domain::{CalendarEvent, Occurrence, ID};
use planner_infra::PlannerContext;

pub async fn get_event_instances_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = GetEventInstancesUseCase {
        event_id: path_params.into_inner().event_id,
        timespan: query_params.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.event, res.instances)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct GetEventInstancesUseCase {
    pub event_id: ID,
    pub timespan: QueryParams,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
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
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub event: CalendarEvent,
    pub instances: Vec<Occurrence>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventInstancesUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventInstances";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let timespan = query_timespan(
            self.timespan.start,
            self.timespan.end,
            ctx.config.event_instances_query_duration_limit,
        )
        .map_err(UseCaseError::InvalidTimespan)?;

        let event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))?
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        let instances = event.expand(&timespan).collect();
        Ok(UseCaseResponse { event, instances })
    }
}

use crate::{
    error::PlannerError,
    shared::usecase::{execute, storage_failure, UseCase},
};
use actix_web::{web, HttpResponse};
use planner_api_structs::search_events::*;
use planner_domain::CalendarEvent;
use planner_infra::PlannerContext;

pub async fn search_events_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = SearchEventsUseCase {
        query: query_params.0.query,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(PlannerError::from)
}

#[derive(Debug)]
pub struct SearchEventsUseCase {
    pub query: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyQuery,
    StorageError,
}

impl From<UseCaseError> for PlannerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyQuery => Self::BadClientData("The search query is empty".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SearchEventsUseCase {
    type Response = Vec<CalendarEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "SearchEvents";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(UseCaseError::EmptyQuery);
        }

        ctx.repos
            .events
            .search(query)
            .await
            .map_err(storage_failure(UseCaseError::StorageError))
    }
}

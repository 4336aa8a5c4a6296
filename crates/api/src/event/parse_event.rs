use crate::{
    error::PlannerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use planner_api_structs::{dtos::EventDraftDTO, parse_event::*};
use planner_domain::nlp::{parse_event, EventDraft, ParseFailure};
use planner_infra::PlannerContext;

pub async fn parse_event_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PlannerContext>,
) -> Result<HttpResponse, PlannerError> {
    let usecase = ParseEventUseCase { text: body.0.text };

    execute(usecase, &ctx)
        .await
        .map(|draft| {
            HttpResponse::Ok().json(APIResponse {
                draft: EventDraftDTO::new(draft),
            })
        })
        .map_err(PlannerError::from)
}

/// Turns free text into an `EventDraft` without storing anything
#[derive(Debug)]
pub struct ParseEventUseCase {
    pub text: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ParseEventUseCase {
    type Response = EventDraft;

    type Error = ParseFailure;

    const NAME: &'static str = "ParseEvent";

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error> {
        parse_event(&self.text, ctx.now())
    }
}

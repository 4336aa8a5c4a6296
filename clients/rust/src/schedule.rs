use crate::{APIResponse, BaseClient};
use chrono::{NaiveDateTime, NaiveTime};
use planner_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ScheduleClient {
    base: Arc<BaseClient>,
}

pub struct GetTimeSlotsInput {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    /// Time of day window the slots should be close to
    pub preferred: Option<(NaiveTime, NaiveTime)>,
}

impl ScheduleClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_time_slots(
        &self,
        input: GetTimeSlotsInput,
    ) -> APIResponse<get_time_slots::APIResponse> {
        let body = get_time_slots::RequestBody {
            start: input.start,
            end: input.end,
            duration_minutes: input.duration_minutes,
            preferred_start: input.preferred.map(|(start, _)| start),
            preferred_end: input.preferred.map(|(_, end)| end),
        };
        self.base
            .post(body, "schedule/slots".into(), StatusCode::OK)
            .await
    }

    pub async fn analyze(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> APIResponse<analyze_schedule::APIResponse> {
        self.base
            .get_with_query(
                "schedule/analysis".into(),
                &analyze_schedule::QueryParams { start, end },
                StatusCode::OK,
            )
            .await
    }
}

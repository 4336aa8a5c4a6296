use chrono::{NaiveDateTime, NaiveTime};
use planner_domain::time_block::{FreeSlot, ScheduleAnalysis};
use serde::{Deserialize, Serialize};

pub mod get_time_slots {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub start: NaiveDateTime,
        pub end: NaiveDateTime,
        pub duration_minutes: i64,
        /// Time of day the caller would like the slot to be close to
        pub preferred_start: Option<NaiveTime>,
        pub preferred_end: Option<NaiveTime>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub slots: Vec<FreeSlot>,
    }
}

pub mod analyze_schedule {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub start: NaiveDateTime,
        pub end: NaiveDateTime,
    }

    pub type APIResponse = ScheduleAnalysis;
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod export_ical {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub start: NaiveDateTime,
        pub end: NaiveDateTime,
    }

    /// Media type of the response body
    pub const CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
}

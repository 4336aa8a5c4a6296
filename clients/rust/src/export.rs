use crate::{APIResponse, BaseClient};
use chrono::NaiveDateTime;
use planner_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ExportClient {
    base: Arc<BaseClient>,
}

impl ExportClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// The iCalendar document for all occurrences in the range
    pub async fn ical(&self, start: NaiveDateTime, end: NaiveDateTime) -> APIResponse<String> {
        self.base
            .get_text(
                "export/ical".into(),
                &export_ical::QueryParams { start, end },
                StatusCode::OK,
            )
            .await
    }
}

use crate::{APIResponse, BaseClient};
use chrono::NaiveDateTime;
use planner_api_structs::*;
use planner_domain::{RecurrenceRule, ReminderTrigger, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct CalendarEventClient {
    base: Arc<BaseClient>,
}

pub struct CreateEventInput {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    pub recurrence: Option<RecurrenceRule>,
    pub reminders: Vec<ReminderTrigger>,
}

impl CreateEventInput {
    pub fn new(title: &str, start: NaiveDateTime, duration_minutes: i64) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: None,
            start,
            duration_minutes,
            recurrence: None,
            reminders: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct UpdateEventInput {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub duration_minutes: Option<i64>,
    pub recurrence: Option<RecurrenceRule>,
    pub remove_recurrence: Option<bool>,
}

pub struct GetEventInstancesInput {
    pub event_id: ID,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CalendarEventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateEventInput) -> APIResponse<create_event::APIResponse> {
        let body = create_event::RequestBody {
            title: input.title,
            description: input.description,
            location: input.location,
            start: input.start,
            duration_minutes: input.duration_minutes,
            recurrence: input.recurrence,
            reminders: input.reminders,
        };

        self.base
            .post(body, "events".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, event_id: ID) -> APIResponse<get_event::APIResponse> {
        self.base
            .get(format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn list(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> APIResponse<get_events::APIResponse> {
        self.base
            .get_with_query(
                "events".into(),
                &get_events::QueryParams { start, end },
                StatusCode::OK,
            )
            .await
    }

    pub async fn search(&self, query: &str) -> APIResponse<search_events::APIResponse> {
        self.base
            .get_with_query(
                "events/search".into(),
                &search_events::QueryParams {
                    query: query.into(),
                },
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_all_instances(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> APIResponse<get_instances::APIResponse> {
        self.base
            .get_with_query(
                "events/instances".into(),
                &get_instances::QueryParams { start, end },
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_instances(
        &self,
        input: GetEventInstancesInput,
    ) -> APIResponse<get_event_instances::APIResponse> {
        self.base
            .get_with_query(
                format!("events/{}/instances", input.event_id),
                &get_event_instances::QueryParams {
                    start: input.start,
                    end: input.end,
                },
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_conflicts(
        &self,
        event_id: ID,
    ) -> APIResponse<get_event_conflicts::APIResponse> {
        self.base
            .get(format!("events/{}/conflicts", event_id), StatusCode::OK)
            .await
    }

    pub async fn parse(&self, text: &str) -> APIResponse<parse_event::APIResponse> {
        let body = parse_event::RequestBody { text: text.into() };
        self.base
            .post(body, "events/parse".into(), StatusCode::OK)
            .await
    }

    pub async fn quick_create(&self, text: &str) -> APIResponse<quick_create_event::APIResponse> {
        let body = quick_create_event::RequestBody { text: text.into() };
        self.base
            .post(body, "events/quick".into(), StatusCode::CREATED)
            .await
    }

    pub async fn update(&self, input: UpdateEventInput) -> APIResponse<update_event::APIResponse> {
        let event_id = input.event_id.clone();
        let body = update_event::RequestBody {
            title: input.title,
            description: input.description,
            location: input.location,
            start: input.start,
            duration_minutes: input.duration_minutes,
            recurrence: input.recurrence,
            remove_recurrence: input.remove_recurrence,
        };
        self.base
            .put(body, format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn reschedule(
        &self,
        event_id: ID,
        start: NaiveDateTime,
    ) -> APIResponse<reschedule_event::APIResponse> {
        let body = reschedule_event::RequestBody { start };
        self.base
            .put(
                body,
                format!("events/{}/reschedule", event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, event_id: ID) -> APIResponse<delete_event::APIResponse> {
        self.base
            .delete(format!("events/{}", event_id), StatusCode::OK)
            .await
    }
}

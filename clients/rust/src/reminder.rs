use crate::{APIResponse, BaseClient};
use planner_api_structs::*;
use planner_domain::{ReminderTrigger, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        event_id: ID,
        trigger: ReminderTrigger,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody { trigger };
        self.base
            .post(
                body,
                format!("events/{}/reminders", event_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get_by_event(
        &self,
        event_id: ID,
    ) -> APIResponse<get_event_reminders::APIResponse> {
        self.base
            .get(format!("events/{}/reminders", event_id), StatusCode::OK)
            .await
    }

    pub async fn get_pending(&self) -> APIResponse<get_pending_reminders::APIResponse> {
        self.base
            .get("reminders/pending".into(), StatusCode::OK)
            .await
    }

    pub async fn mark_delivered(
        &self,
        reminder_id: ID,
    ) -> APIResponse<mark_reminder_delivered::APIResponse> {
        self.base
            .put(
                (),
                format!("reminders/{}/delivered", reminder_id),
                StatusCode::OK,
            )
            .await
    }
}

use crate::dtos::{PendingReminderDTO, ReminderDTO};
use planner_domain::{CalendarEvent, Reminder, ReminderTrigger, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder, event: &CalendarEvent) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder, event),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub trigger: ReminderTrigger,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_event_reminders {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>, event: &CalendarEvent) -> Self {
            Self {
                reminders: reminders
                    .into_iter()
                    .map(|r| ReminderDTO::new(r, event))
                    .collect(),
            }
        }
    }
}

pub mod get_pending_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<PendingReminderDTO>,
    }
}

pub mod mark_reminder_delivered {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

use crate::dtos::{CalendarEventDTO, EventDraftDTO};
use chrono::NaiveDateTime;
use planner_domain::{CalendarEvent, Occurrence, RecurrenceRule, ReminderTrigger, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
    pub event: CalendarEventDTO,
}

impl CalendarEventResponse {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            event: CalendarEventDTO::new(event),
        }
    }
}

/// A saved event together with the existing occurrences it overlaps.
/// Conflicts are warnings, the event is stored regardless.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithConflictsResponse {
    pub event: CalendarEventDTO,
    pub conflicts: Vec<Occurrence>,
}

impl EventWithConflictsResponse {
    pub fn new(event: CalendarEvent, conflicts: Vec<Occurrence>) -> Self {
        Self {
            event: CalendarEventDTO::new(event),
            conflicts,
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventsResponse {
    pub events: Vec<CalendarEventDTO>,
}

impl CalendarEventsResponse {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            events: events.into_iter().map(CalendarEventDTO::new).collect(),
        }
    }
}

/// Closed datetime range used by the range queries
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpanQuery {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

pub mod create_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub description: Option<String>,
        pub location: Option<String>,
        pub start: NaiveDateTime,
        pub duration_minutes: i64,
        pub recurrence: Option<RecurrenceRule>,
        #[serde(default)]
        pub reminders: Vec<ReminderTrigger>,
    }

    pub type APIResponse = EventWithConflictsResponse;
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod get_events {
    use super::*;

    pub type QueryParams = TimeSpanQuery;

    pub type APIResponse = CalendarEventsResponse;
}

pub mod search_events {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub query: String,
    }

    pub type APIResponse = CalendarEventsResponse;
}

pub mod get_instances {
    use super::*;

    pub type QueryParams = TimeSpanQuery;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub instances: Vec<Occurrence>,
    }
}

pub mod get_event_instances {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type QueryParams = TimeSpanQuery;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: CalendarEventDTO,
        pub instances: Vec<Occurrence>,
    }

    impl APIResponse {
        pub fn new(event: CalendarEvent, instances: Vec<Occurrence>) -> Self {
            Self {
                event: CalendarEventDTO::new(event),
                instances,
            }
        }
    }
}

pub mod get_event_conflicts {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub conflicts: Vec<Occurrence>,
    }
}

pub mod parse_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub text: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub draft: EventDraftDTO,
    }
}

pub mod quick_create_event {
    use super::*;

    pub type RequestBody = super::parse_event::RequestBody;

    pub type APIResponse = EventWithConflictsResponse;
}

pub mod update_event {
    use super::*;

    /// Only the given fields are changed. An empty description or
    /// location clears it.
    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: Option<String>,
        pub description: Option<String>,
        pub location: Option<String>,
        pub start: Option<NaiveDateTime>,
        pub duration_minutes: Option<i64>,
        pub recurrence: Option<RecurrenceRule>,
        /// Turns a recurring event into a single one
        pub remove_recurrence: Option<bool>,
    }

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventWithConflictsResponse;
}

pub mod reschedule_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub start: NaiveDateTime,
    }

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventWithConflictsResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

use chrono::NaiveDateTime;
use planner_domain::{nlp::EventDraft, CalendarEvent, RecurrenceRule, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDTO {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    pub recurrence: Option<RecurrenceRule>,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

impl CalendarEventDTO {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            location: event.location,
            start: event.start,
            duration_minutes: event.duration.num_minutes(),
            recurrence: event.recurrence,
            created: event.created,
            updated: event.updated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDraftDTO {
    pub title: String,
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    pub recurrence: Option<RecurrenceRule>,
    pub location: Option<String>,
    pub reminder_minutes_before: Option<i64>,
}

impl EventDraftDTO {
    pub fn new(draft: EventDraft) -> Self {
        Self {
            title: draft.title,
            start: draft.start,
            duration_minutes: draft.duration.num_minutes(),
            recurrence: draft.recurrence,
            location: draft.location,
            reminder_minutes_before: draft.reminder_minutes_before,
        }
    }
}

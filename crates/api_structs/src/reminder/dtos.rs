use chrono::NaiveDateTime;
use planner_domain::{CalendarEvent, Reminder, ReminderTrigger, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub event_id: ID,
    pub trigger: ReminderTrigger,
    pub remind_at: NaiveDateTime,
    pub delivered: bool,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder, event: &CalendarEvent) -> Self {
        Self {
            remind_at: reminder.remind_at(event),
            id: reminder.id,
            event_id: reminder.event_id,
            trigger: reminder.trigger,
            delivered: reminder.delivered,
        }
    }
}

/// A due reminder together with what the notification should show
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingReminderDTO {
    pub reminder: ReminderDTO,
    pub event_title: String,
    pub event_start: NaiveDateTime,
}

impl PendingReminderDTO {
    pub fn new(reminder: Reminder, event: &CalendarEvent) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder, event),
            event_title: event.title.clone(),
            event_start: event.start,
        }
    }
}

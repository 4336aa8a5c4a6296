use crate::{
    event::CalendarEvent,
    shared::entity::{Entity, ID},
};
use chrono::{prelude::*, Duration};
use serde::{Deserialize, Serialize};

/// Largest allowed offset of a `ReminderTrigger::MinutesBefore`
pub const MAX_REMINDER_OFFSET_MINUTES: i64 = 7 * 24 * 60;

/// When a `Reminder` fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReminderTrigger {
    /// Minutes before the anchor start of the event
    MinutesBefore(i64),
    /// Absolute wall-clock time
    At(NaiveDateTime),
}

impl ReminderTrigger {
    pub fn is_valid(&self) -> bool {
        match self {
            Self::MinutesBefore(minutes) => (0..=MAX_REMINDER_OFFSET_MINUTES).contains(minutes),
            Self::At(_) => true,
        }
    }
}

/// A `Reminder` represents a point in time, usually some minutes before a
/// `CalendarEvent`, at which the owner should be notified.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `CalendarEvent` this `Reminder` is associated with
    pub event_id: ID,
    pub trigger: ReminderTrigger,
    /// Set once the reminder has been handed out, so it is never
    /// returned as pending again
    pub delivered: bool,
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Reminder {
    pub fn new(event_id: ID, trigger: ReminderTrigger) -> Self {
        Self {
            id: Default::default(),
            event_id,
            trigger,
            delivered: false,
        }
    }

    pub fn remind_at(&self, event: &CalendarEvent) -> NaiveDateTime {
        match self.trigger {
            ReminderTrigger::MinutesBefore(minutes) => Duration::try_minutes(minutes)
                .and_then(|offset| event.start.checked_sub_signed(offset))
                .unwrap_or(NaiveDateTime::MIN),
            ReminderTrigger::At(at) => at,
        }
    }

    pub fn is_due(&self, event: &CalendarEvent, now: NaiveDateTime) -> bool {
        !self.delivered && self.remind_at(event) <= now
    }
}

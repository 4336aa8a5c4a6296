use crate::{
    occurrence::Occurrences,
    shared::entity::{Entity, ID},
    shared::recurrence::{RecurrenceEnd, RecurrenceRule, MAX_RECURRENCE_COUNT},
    timespan::TimeSpan,
};
use chrono::{prelude::*, Duration};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum EventValidationError {
    #[error("The event title must not be empty")]
    EmptyTitle,
    #[error("The event duration must not be negative")]
    NegativeDuration,
    #[error("The event duration is too large")]
    DurationOutOfRange,
    #[error("The recurrence interval must be at least 1, but it was {0}")]
    InvalidInterval(i64),
    #[error("The recurrence count must be at least 1, but it was {0}")]
    NonPositiveCount(i32),
    #[error("The recurrence count {0} exceeds the maximum of {max}", max = MAX_RECURRENCE_COUNT)]
    CountTooLarge(i32),
    #[error("The recurrence end {until} is before the event start {start}")]
    UntilBeforeStart {
        until: NaiveDateTime,
        start: NaiveDateTime,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Anchor start, also the start of the first occurrence
    pub start: NaiveDateTime,
    pub duration: Duration,
    pub recurrence: Option<RecurrenceRule>,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Partial update of a `CalendarEvent`. `None` leaves a field untouched.
/// An empty description or location clears it.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub duration: Option<Duration>,
    pub recurrence: Option<Option<RecurrenceRule>>,
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl CalendarEvent {
    pub fn new(title: &str, start: NaiveDateTime, duration: Duration, now: NaiveDateTime) -> Self {
        Self {
            id: Default::default(),
            title: title.trim().to_string(),
            description: None,
            location: None,
            start,
            duration,
            recurrence: None,
            created: now,
            updated: now,
        }
    }

    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.duration < Duration::zero() {
            return Err(EventValidationError::NegativeDuration);
        }
        if self.start.checked_add_signed(self.duration).is_none() {
            return Err(EventValidationError::DurationOutOfRange);
        }
        if let Some(rule) = &self.recurrence {
            rule.validate(self.start)?;
        }
        Ok(())
    }

    /// End of the anchor occurrence
    pub fn end(&self) -> NaiveDateTime {
        self.start
            .checked_add_signed(self.duration)
            .unwrap_or(NaiveDateTime::MAX)
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description.and_then(non_empty);
    }

    pub fn set_location(&mut self, location: Option<String>) {
        self.location = location.and_then(non_empty);
    }

    /// Applies the patch if the resulting event is valid. On error the
    /// event is left unchanged.
    pub fn apply(&mut self, patch: EventPatch, now: NaiveDateTime) -> Result<(), EventValidationError> {
        let mut updated = self.clone();
        if let Some(title) = patch.title {
            updated.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            updated.set_description(Some(description));
        }
        if let Some(location) = patch.location {
            updated.set_location(Some(location));
        }
        if let Some(start) = patch.start {
            updated.start = start;
        }
        if let Some(duration) = patch.duration {
            updated.duration = duration;
        }
        if let Some(recurrence) = patch.recurrence {
            updated.recurrence = recurrence;
        }
        updated.validate()?;
        updated.updated = now;
        *self = updated;
        Ok(())
    }

    /// Moves the anchor start keeping the duration and the recurrence shape
    pub fn reschedule(
        &mut self,
        new_start: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<(), EventValidationError> {
        self.apply(
            EventPatch {
                start: Some(new_start),
                ..Default::default()
            },
            now,
        )
    }

    /// Lazily yields the occurrences of this event inside `timespan`
    pub fn expand(&self, timespan: &TimeSpan) -> Occurrences {
        Occurrences::new(self, *timespan)
    }

    /// End of the last occurrence, `None` for open-ended recurrences
    pub fn horizon(&self) -> Option<NaiveDateTime> {
        let rule = match &self.recurrence {
            None => return Some(self.end()),
            Some(rule) => rule,
        };
        let last_start = match rule.end? {
            RecurrenceEnd::Count(count) => rule.nth_start(self.start, i64::from(count) - 1),
            RecurrenceEnd::Until(until) => self
                .expand(&TimeSpan::new(self.start, until.max(self.start)))
                .last()
                .map(|occurrence| occurrence.start),
        };
        let last_start = last_start.unwrap_or(self.start);
        Some(
            last_start
                .checked_add_signed(self.duration)
                .unwrap_or(NaiveDateTime::MAX),
        )
    }

    /// The range to check for overlaps when this event is saved. Recurring
    /// events are only checked `lookahead` past their anchor start.
    pub fn conflict_window(&self, lookahead: Duration) -> TimeSpan {
        if self.recurrence.is_none() {
            return TimeSpan::new(self.start, self.end());
        }
        let limit = self
            .start
            .checked_add_signed(lookahead)
            .unwrap_or(NaiveDateTime::MAX);
        let end = match self.horizon() {
            Some(horizon) => horizon.min(limit),
            None => limit,
        };
        TimeSpan::new(self.start, end.max(self.start))
    }
}

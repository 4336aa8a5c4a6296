use crate::date::add_months;
use crate::event::EventValidationError;
use chrono::{prelude::*, Duration};
use serde::{Deserialize, Serialize};

/// Upper bound on `RecurrenceEnd::Count`
pub const MAX_RECURRENCE_COUNT: i32 = 500;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RecurrenceEnd {
    /// Last allowed occurrence start, inclusive
    Until(NaiveDateTime),
    /// Total number of occurrences including the first one
    Count(i32),
}

/// How a `CalendarEvent` repeats. Every occurrence start is derived from the
/// anchor start of the event, so monthly rules never drift after a clamped
/// month.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[serde(default = "default_interval")]
    pub interval: i64,
    #[serde(default)]
    pub end: Option<RecurrenceEnd>,
}

fn default_interval() -> i64 {
    1
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self {
            frequency: Frequency::Daily,
            interval: 1,
            end: None,
        }
    }
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            ..Default::default()
        }
    }

    pub fn with_interval(mut self, interval: i64) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_end(mut self, end: RecurrenceEnd) -> Self {
        self.end = Some(end);
        self
    }

    pub fn validate(&self, anchor: NaiveDateTime) -> Result<(), EventValidationError> {
        if self.interval < 1 {
            return Err(EventValidationError::InvalidInterval(self.interval));
        }
        match self.end {
            Some(RecurrenceEnd::Count(count)) if count < 1 => {
                Err(EventValidationError::NonPositiveCount(count))
            }
            Some(RecurrenceEnd::Count(count)) if count > MAX_RECURRENCE_COUNT => {
                Err(EventValidationError::CountTooLarge(count))
            }
            Some(RecurrenceEnd::Until(until)) if until < anchor => {
                Err(EventValidationError::UntilBeforeStart {
                    until,
                    start: anchor,
                })
            }
            _ => Ok(()),
        }
    }

    /// Start of the k-th occurrence (0 being the anchor itself), ignoring
    /// the end condition. `None` when the date leaves chrono's range.
    pub fn nth_start(&self, anchor: NaiveDateTime, k: i64) -> Option<NaiveDateTime> {
        let steps = k.checked_mul(self.interval)?;
        match self.frequency {
            Frequency::Daily => anchor.checked_add_signed(Duration::try_days(steps)?),
            Frequency::Weekly => anchor.checked_add_signed(Duration::try_weeks(steps)?),
            Frequency::Monthly => {
                add_months(anchor.date(), steps).map(|date| date.and_time(anchor.time()))
            }
        }
    }

    /// A candidate index whose start is not after `from`, close enough that
    /// iterating forward from it is cheap.
    pub(crate) fn index_near(&self, anchor: NaiveDateTime, from: NaiveDateTime) -> i64 {
        if from <= anchor {
            return 0;
        }
        let elapsed_periods = match self.frequency {
            Frequency::Daily => (from - anchor).num_days(),
            Frequency::Weekly => (from - anchor).num_weeks(),
            Frequency::Monthly => {
                i64::from(from.year() - anchor.year()) * 12 + i64::from(from.month())
                    - i64::from(anchor.month())
            }
        };
        // One step back covers month clamping and time of day.
        (elapsed_periods / self.interval - 1).max(0)
    }

    /// Whether the k-th occurrence is still allowed by the end condition
    pub(crate) fn allows(&self, k: i64, start: NaiveDateTime) -> bool {
        match self.end {
            None => true,
            Some(RecurrenceEnd::Count(count)) => k < i64::from(count),
            Some(RecurrenceEnd::Until(until)) => start <= until,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn it_deserializes_with_defaults() {
        let rule: RecurrenceRule = serde_json::from_str(r#"{"frequency":"weekly"}"#).unwrap();
        assert_eq!(rule, RecurrenceRule::new(Frequency::Weekly));

        let rule: RecurrenceRule =
            serde_json::from_str(r#"{"frequency":"monthly","interval":2,"end":{"count":4}}"#)
                .unwrap();
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.end, Some(RecurrenceEnd::Count(4)));
    }

    #[test]
    fn it_rejects_invalid_rules() {
        let anchor = dt("2024-01-10T10:00");
        assert!(RecurrenceRule::new(Frequency::Daily)
            .with_interval(0)
            .validate(anchor)
            .is_err());
        assert!(RecurrenceRule::new(Frequency::Daily)
            .with_end(RecurrenceEnd::Count(0))
            .validate(anchor)
            .is_err());
        assert!(RecurrenceRule::new(Frequency::Daily)
            .with_end(RecurrenceEnd::Count(MAX_RECURRENCE_COUNT + 1))
            .validate(anchor)
            .is_err());
        assert!(RecurrenceRule::new(Frequency::Daily)
            .with_end(RecurrenceEnd::Until(dt("2024-01-09T10:00")))
            .validate(anchor)
            .is_err());
        assert!(RecurrenceRule::new(Frequency::Daily)
            .with_end(RecurrenceEnd::Until(anchor))
            .validate(anchor)
            .is_ok());
    }

    #[test]
    fn monthly_starts_are_clamped_without_drift() {
        let anchor = dt("2024-01-31T10:00");
        let rule = RecurrenceRule::new(Frequency::Monthly);
        assert_eq!(rule.nth_start(anchor, 1), Some(dt("2024-02-29T10:00")));
        assert_eq!(rule.nth_start(anchor, 2), Some(dt("2024-03-31T10:00")));
        assert_eq!(rule.nth_start(anchor, 3), Some(dt("2024-04-30T10:00")));
        assert_eq!(rule.nth_start(anchor, 13), Some(dt("2025-02-28T10:00")));
    }

    #[test]
    fn index_near_never_overshoots() {
        let anchor = dt("2024-01-31T10:00");
        let rule = RecurrenceRule::new(Frequency::Monthly);
        let from = dt("2024-05-15T00:00");
        let k = rule.index_near(anchor, from);
        assert!(rule.nth_start(anchor, k).unwrap() <= from);

        let rule = RecurrenceRule::new(Frequency::Daily).with_interval(3);
        let from = dt("2024-03-01T09:00");
        let k = rule.index_near(anchor, from);
        assert!(rule.nth_start(anchor, k).unwrap() <= from);
    }
}

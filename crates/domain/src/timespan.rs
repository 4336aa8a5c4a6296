use chrono::{prelude::*, Duration};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Closed range of wall-clock datetimes `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpan {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSpan {
    /// Builds a span without checking the order of its bounds. Callers must
    /// guarantee `start <= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn create(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, InvalidTimeSpanError> {
        if end < start {
            Err(InvalidTimeSpanError(start, end))
        } else {
            Ok(Self { start, end })
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn greater_than(&self, limit: Duration) -> bool {
        self.duration() > limit
    }

    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        self.start <= dt && dt <= self.end
    }
}

#[derive(Debug, PartialEq)]
pub struct InvalidTimeSpanError(NaiveDateTime, NaiveDateTime);

impl Error for InvalidTimeSpanError {}

impl std::fmt::Display for InvalidTimeSpanError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Provided timespan start: {} and end: {} is invalid. The end must not be before the start.",
            self.0, self.1
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_rejects_reversed_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = start - Duration::hours(1);
        assert!(TimeSpan::create(start, end).is_err());
        assert!(TimeSpan::create(end, start).is_ok());
        assert!(TimeSpan::create(start, start).is_ok());
    }
}

use chrono::{DateTime, NaiveDateTime};
use planner_domain::CalendarEvent;

/// Stored `end_ts` of events that never stop recurring
pub const OPEN_ENDED_TS: i64 = i64::MAX;

/// Naive datetimes are stored as if they were UTC
pub fn to_timestamp(dt: &NaiveDateTime) -> i64 {
    dt.and_utc().timestamp()
}

pub fn from_timestamp(ts: i64) -> anyhow::Result<NaiveDateTime> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| anyhow::anyhow!("Stored timestamp {} is out of range", ts))
}

pub fn end_timestamp(e: &CalendarEvent) -> i64 {
    e.horizon()
        .map(|horizon| to_timestamp(&horizon))
        .unwrap_or(OPEN_ENDED_TS)
}

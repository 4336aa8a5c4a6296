use chrono::{Duration, NaiveTime};
use chrono_tz::Tz;
use planner_domain::time_block::WorkingHours;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Number of http workers
    pub workers: usize,
    /// SQLite connection string. The in-memory repositories are used when
    /// this is not set.
    pub database_url: Option<String>,
    /// Zone used to turn the current instant into the naive local "now"
    pub timezone: Tz,
    /// Window in which free slots are suggested
    pub working_hours: WorkingHours,
    /// How far ahead open-ended recurrences are checked for conflicts
    pub conflict_lookahead: Duration,
    /// Maximum allowed duration for querying event instances.
    /// This is used to avoid having clients ask for occurrences in a
    /// timespan of several years which will take a lot of time to compute
    /// and is also not very useful information to query about anyways.
    pub event_instances_query_duration_limit: Duration,
    /// Maximum allowed duration for querying free time slots
    pub time_slots_query_duration_limit: Duration,
}

fn parse_or_default<T: FromStr + std::fmt::Display>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
    }
}

fn parse_time_or_default(key: &str, value: Option<String>, default: NaiveTime) -> NaiveTime {
    match value {
        None => default,
        Some(value) => match NaiveTime::parse_from_str(value.trim(), "%H:%M") {
            Ok(time) => time,
            Err(_) => {
                warn!(
                    "The given {}: {} is not a valid HH:MM time, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
    }
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let port = parse_or_default("PORT", lookup("PORT"), 5000);
        let workers = match parse_or_default("PLANNER_WORKERS", lookup("PLANNER_WORKERS"), 1) {
            0 => {
                warn!("PLANNER_WORKERS must be at least 1, falling back to 1.");
                1
            }
            workers => workers,
        };
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let timezone = parse_or_default("PLANNER_TIMEZONE", lookup("PLANNER_TIMEZONE"), Tz::UTC);

        let default_hours = WorkingHours::default();
        let mut working_hours = WorkingHours {
            start: parse_time_or_default(
                "PLANNER_WORK_DAY_START",
                lookup("PLANNER_WORK_DAY_START"),
                default_hours.start,
            ),
            end: parse_time_or_default(
                "PLANNER_WORK_DAY_END",
                lookup("PLANNER_WORK_DAY_END"),
                default_hours.end,
            ),
            skip_weekends: parse_or_default(
                "PLANNER_SKIP_WEEKENDS",
                lookup("PLANNER_SKIP_WEEKENDS"),
                false,
            ),
        };
        if !working_hours.is_valid() {
            warn!(
                "The work day start {} is not before its end {}, falling back to {} - {}.",
                working_hours.start, working_hours.end, default_hours.start, default_hours.end
            );
            working_hours.start = default_hours.start;
            working_hours.end = default_hours.end;
        }

        let lookahead_days = parse_or_default(
            "PLANNER_CONFLICT_LOOKAHEAD_DAYS",
            lookup("PLANNER_CONFLICT_LOOKAHEAD_DAYS"),
            62u32,
        );

        Self {
            port,
            workers,
            database_url,
            timezone,
            working_hours,
            conflict_lookahead: Duration::days(i64::from(lookahead_days)),
            event_instances_query_duration_limit: Duration::days(62),
            time_slots_query_duration_limit: Duration::days(31),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn it_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.workers, 1);
        assert_eq!(config.database_url, None);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.working_hours, WorkingHours::default());
        assert_eq!(config.conflict_lookahead, Duration::days(62));
    }

    #[test]
    fn it_reads_values() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("PLANNER_WORKERS", "4"),
            ("DATABASE_URL", "sqlite://planner.db?mode=rwc"),
            ("PLANNER_TIMEZONE", "Europe/Oslo"),
            ("PLANNER_WORK_DAY_START", "09:30"),
            ("PLANNER_WORK_DAY_END", "17:00"),
            ("PLANNER_SKIP_WEEKENDS", "true"),
            ("PLANNER_CONFLICT_LOOKAHEAD_DAYS", "14"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.workers, 4);
        assert_eq!(
            config.database_url.as_deref(),
            Some("sqlite://planner.db?mode=rwc")
        );
        assert_eq!(config.timezone, chrono_tz::Europe::Oslo);
        assert_eq!(
            config.working_hours.start,
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(config.working_hours.skip_weekends);
        assert_eq!(config.conflict_lookahead, Duration::days(14));
    }

    #[test]
    fn it_falls_back_on_invalid_values() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("PLANNER_WORKERS", "0"),
            ("PLANNER_TIMEZONE", "Mars/Olympus"),
            ("PLANNER_WORK_DAY_START", "18:00"),
            ("PLANNER_WORK_DAY_END", "08:00"),
        ]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.workers, 1);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.working_hours, WorkingHours::default());
    }
}

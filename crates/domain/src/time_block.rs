use crate::{occurrence::Occurrence, timespan::TimeSpan};
use chrono::{prelude::*, Duration};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Days with at least this many occurrences are reported as overloaded
pub const OVERLOADED_DAY_THRESHOLD: usize = 8;

/// Daily window in which the advisor is allowed to place slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub skip_weekends: bool,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            skip_weekends: false,
        }
    }
}

impl WorkingHours {
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    fn is_working_day(&self, date: NaiveDate) -> bool {
        !(self.skip_weekends && matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
    }
}

/// Time-of-day range the caller would like a slot to be close to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl FreeSlot {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Distance to the preferred window on the same day, zero on overlap
    fn distance_to(&self, preferred: &TimeWindow) -> Duration {
        let date = self.start.date();
        let window_start = date.and_time(preferred.start);
        let window_end = date.and_time(preferred.end);
        if self.start < window_end && window_start < self.end {
            Duration::zero()
        } else if self.end <= window_start {
            window_start - self.end
        } else {
            self.start - window_end
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlotQuery {
    pub timespan: TimeSpan,
    pub duration: Duration,
    pub preferred: Option<TimeWindow>,
    pub working_hours: WorkingHours,
}

/// Free slots of at least `query.duration` between the given occurrences,
/// one working day at a time.
pub fn suggest_slots(occurrences: &[Occurrence], query: &SlotQuery) -> Vec<FreeSlot> {
    let first_day = query.timespan.start().date();
    let last_day = query.timespan.end().date();

    let mut slots = first_day
        .iter_days()
        .take_while(|date| *date <= last_day)
        .filter(|date| query.working_hours.is_working_day(*date))
        .filter_map(|date| {
            let start = date
                .and_time(query.working_hours.start)
                .max(query.timespan.start());
            let end = date
                .and_time(query.working_hours.end)
                .min(query.timespan.end());
            if start < end {
                Some(TimeSpan::new(start, end))
            } else {
                None
            }
        })
        .flat_map(|window| free_slots_in_window(occurrences, &window, query.duration))
        .collect::<Vec<_>>();

    if let Some(preferred) = &query.preferred {
        // Stable, so equally close slots stay chronological
        slots.sort_by_key(|slot| slot.distance_to(preferred));
    }
    slots
}

fn free_slots_in_window(
    occurrences: &[Occurrence],
    window: &TimeSpan,
    min_duration: Duration,
) -> Vec<FreeSlot> {
    let busy = occurrences
        .iter()
        .filter(|o| o.start < window.end() && o.end > window.start())
        .map(|o| (o.start.max(window.start()), o.end.min(window.end())))
        .sorted();

    let mut slots = Vec::new();
    let mut cursor = window.start();
    let mut push_gap = |start: NaiveDateTime, end: NaiveDateTime| {
        let slot = FreeSlot { start, end };
        if end > start && slot.duration() >= min_duration {
            slots.push(slot);
        }
    };
    for (start, end) in busy {
        if start > cursor {
            push_gap(cursor, start);
        }
        cursor = cursor.max(end);
    }
    if window.end() > cursor {
        push_gap(cursor, window.end());
    }
    slots
}

/// Existing occurrences overlapping any of the candidate occurrences,
/// ordered by start.
pub fn find_conflicts(candidates: &[Occurrence], existing: &[Occurrence]) -> Vec<Occurrence> {
    existing
        .iter()
        .filter(|o| candidates.iter().any(|c| c.conflicts_with(o)))
        .sorted_by(|a, b| (a.start, &a.event_id).cmp(&(b.start, &b.event_id)))
        .dedup()
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictPair {
    pub first: Occurrence,
    pub second: Occurrence,
    pub overlap_start: NaiveDateTime,
    pub overlap_end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverloadedDay {
    pub date: NaiveDate,
    pub occurrences: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAnalysis {
    pub conflicts: Vec<ConflictPair>,
    pub overloaded_days: Vec<OverloadedDay>,
}

pub fn analyze_schedule(occurrences: &[Occurrence]) -> ScheduleAnalysis {
    let sorted = occurrences
        .iter()
        .sorted_by(|a, b| (a.start, &a.event_id).cmp(&(b.start, &b.event_id)))
        .collect::<Vec<_>>();

    let conflicts = sorted
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.conflicts_with(b))
        .map(|(a, b)| ConflictPair {
            first: (*a).clone(),
            second: (*b).clone(),
            overlap_start: a.start.max(b.start),
            overlap_end: a.end.min(b.end),
        })
        .collect();

    let overloaded_days = sorted
        .iter()
        .map(|o| o.start.date())
        .dedup_with_count()
        .filter(|(count, _)| *count >= OVERLOADED_DAY_THRESHOLD)
        .map(|(occurrences, date)| OverloadedDay { date, occurrences })
        .collect();

    ScheduleAnalysis {
        conflicts,
        overloaded_days,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::entity::ID;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn occ(start: &str, end: &str) -> Occurrence {
        Occurrence {
            event_id: ID::new(),
            start: dt(start),
            end: dt(end),
        }
    }

    fn query(start: &str, end: &str, minutes: i64) -> SlotQuery {
        SlotQuery {
            timespan: TimeSpan::create(dt(start), dt(end)).unwrap(),
            duration: Duration::minutes(minutes),
            preferred: None,
            working_hours: Default::default(),
        }
    }

    #[test]
    fn it_returns_only_gaps_long_enough() {
        let occurrences = vec![
            occ("2024-03-14T09:00", "2024-03-14T10:00"),
            occ("2024-03-14T11:00", "2024-03-14T12:00"),
        ];
        let slots = suggest_slots(&occurrences, &query("2024-03-14T00:00", "2024-03-14T23:59", 90));
        assert_eq!(
            slots,
            vec![FreeSlot {
                start: dt("2024-03-14T12:00"),
                end: dt("2024-03-14T20:00")
            }]
        );
        assert_eq!(slots[0].duration(), Duration::hours(8));
    }

    #[test]
    fn it_handles_overlapping_and_outside_occurrences() {
        let occurrences = vec![
            occ("2024-03-14T06:00", "2024-03-14T09:00"),
            occ("2024-03-14T10:00", "2024-03-14T13:00"),
            occ("2024-03-14T11:00", "2024-03-14T12:00"),
            occ("2024-03-14T19:00", "2024-03-14T22:00"),
        ];
        let slots = suggest_slots(&occurrences, &query("2024-03-14T00:00", "2024-03-14T23:59", 60));
        assert_eq!(
            slots,
            vec![
                FreeSlot {
                    start: dt("2024-03-14T09:00"),
                    end: dt("2024-03-14T10:00")
                },
                FreeSlot {
                    start: dt("2024-03-14T13:00"),
                    end: dt("2024-03-14T19:00")
                },
            ]
        );
    }

    #[test]
    fn it_spans_multiple_days_and_skips_weekends() {
        // 2024-03-15 is a Friday
        let mut q = query("2024-03-15T00:00", "2024-03-18T23:59", 60);
        assert_eq!(suggest_slots(&[], &q).len(), 4);

        q.working_hours.skip_weekends = true;
        let slots = suggest_slots(&[], &q);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].start, dt("2024-03-18T08:00"));
    }

    #[test]
    fn query_start_clips_the_first_day() {
        let slots = suggest_slots(&[], &query("2024-03-14T15:30", "2024-03-14T23:59", 60));
        assert_eq!(
            slots,
            vec![FreeSlot {
                start: dt("2024-03-14T15:30"),
                end: dt("2024-03-14T20:00")
            }]
        );
    }

    #[test]
    fn preferred_window_orders_by_proximity() {
        let occurrences = vec![
            occ("2024-03-14T10:00", "2024-03-14T12:00"),
            occ("2024-03-14T14:00", "2024-03-14T18:00"),
        ];
        let mut q = query("2024-03-14T00:00", "2024-03-14T23:59", 60);
        q.preferred = Some(TimeWindow {
            start: time("18:30"),
            end: time("19:00"),
        });
        let slots = suggest_slots(&occurrences, &q);
        assert_eq!(
            slots.iter().map(|s| s.start).collect::<Vec<_>>(),
            vec![
                dt("2024-03-14T18:00"),
                dt("2024-03-14T12:00"),
                dt("2024-03-14T08:00")
            ]
        );
    }

    #[test]
    fn conflicts_are_half_open() {
        let candidate = vec![occ("2024-03-14T10:00", "2024-03-14T11:00")];
        let existing = vec![
            occ("2024-03-14T09:00", "2024-03-14T10:00"),
            occ("2024-03-14T10:30", "2024-03-14T12:00"),
            occ("2024-03-14T11:00", "2024-03-14T12:00"),
        ];
        let conflicts = find_conflicts(&candidate, &existing);
        assert_eq!(conflicts, vec![existing[1].clone()]);
    }

    #[test]
    fn analysis_reports_pairs_and_busy_days() {
        let mut occurrences = (0..8)
            .map(|i| {
                let start = dt("2024-03-14T08:00") + Duration::hours(i);
                Occurrence {
                    event_id: ID::new(),
                    start,
                    end: start + Duration::minutes(30),
                }
            })
            .collect::<Vec<_>>();
        occurrences.push(occ("2024-03-14T08:15", "2024-03-14T08:45"));
        occurrences.push(occ("2024-03-15T08:00", "2024-03-15T09:00"));

        let analysis = analyze_schedule(&occurrences);
        assert_eq!(analysis.conflicts.len(), 1);
        assert_eq!(analysis.conflicts[0].overlap_start, dt("2024-03-14T08:15"));
        assert_eq!(analysis.conflicts[0].overlap_end, dt("2024-03-14T08:30"));
        assert_eq!(
            analysis.overloaded_days,
            vec![OverloadedDay {
                date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
                occurrences: 9
            }]
        );
    }
}

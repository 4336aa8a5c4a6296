use super::rules::{Fragment, Slot, RULES};
use super::token::{tokenize, Token};
use crate::date::next_weekday;
use crate::event::CalendarEvent;
use crate::shared::recurrence::RecurrenceRule;
use chrono::{prelude::*, Duration};
use thiserror::Error;

/// Leading words dropped from the title, "Schedule lunch with Sam"
const COMMAND_WORDS: &[&str] = &["add", "book", "create", "plan", "schedule"];
/// Words left dangling at the end of a title once a phrase is removed
const DANGLING_WORDS: &[&str] = &[
    "and", "at", "by", "every", "for", "from", "in", "next", "on", "the", "this",
];

const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Event fields recognized in a free-text description
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub start: NaiveDateTime,
    pub duration: Duration,
    pub recurrence: Option<RecurrenceRule>,
    pub location: Option<String>,
    pub reminder_minutes_before: Option<i64>,
    /// Names of the rules that matched, in priority order
    pub matched_rules: Vec<&'static str>,
}

impl EventDraft {
    pub fn to_event(&self, now: NaiveDateTime) -> CalendarEvent {
        let mut event = CalendarEvent::new(&self.title, self.start, self.duration, now);
        event.recurrence = self.recurrence;
        event.set_location(self.location.clone());
        event
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseFailure {
    #[error("No date, time or recurrence was recognized in: {remainder}")]
    NoTemporalPhrase { remainder: String },
    #[error("Nothing is left for the title of: {remainder}")]
    EmptyTitle { remainder: String },
}

impl ParseFailure {
    /// The text that could not be turned into an event
    pub fn remainder(&self) -> &str {
        match self {
            Self::NoTemporalPhrase { remainder } | Self::EmptyTitle { remainder } => remainder,
        }
    }
}

#[derive(Default)]
struct Extracted {
    reminder: Option<i64>,
    recurrence: Option<(RecurrenceRule, Option<Weekday>)>,
    duration: Option<Duration>,
    moment: Option<NaiveDateTime>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    location: Option<String>,
}

impl Extracted {
    fn add(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::Reminder(minutes) => self.reminder = Some(minutes),
            Fragment::Recurrence { rule, weekday } => self.recurrence = Some((rule, weekday)),
            Fragment::Duration(duration) => self.duration = Some(duration),
            Fragment::Moment(moment) => self.moment = Some(moment),
            Fragment::Date(date) => self.date = Some(date),
            Fragment::Time(time) => self.time = Some(time),
            Fragment::Location(location) => self.location = Some(location),
        }
    }

    fn has_temporal_phrase(&self) -> bool {
        self.moment.is_some()
            || self.date.is_some()
            || self.time.is_some()
            || self.recurrence.is_some()
    }

    fn resolve_start(&self, now: NaiveDateTime) -> NaiveDateTime {
        if let Some(moment) = self.moment {
            return moment;
        }
        let today = now.date();
        let time = self
            .time
            .or_else(|| NaiveTime::from_hms_opt(9, 0, 0))
            .unwrap_or_default();
        let date = self.date.or_else(|| {
            self.recurrence
                .and_then(|(_, weekday)| weekday)
                .map(|weekday| next_weekday(today, weekday))
        });
        match date {
            Some(date) => date.and_time(time),
            None => {
                let candidate = today.and_time(time);
                if candidate > now {
                    candidate
                } else {
                    candidate + Duration::days(1)
                }
            }
        }
    }
}

fn build_title(tokens: &[Token]) -> String {
    let mut words = tokens;
    if words.len() > 1 && COMMAND_WORDS.contains(&words[0].norm.as_str()) {
        words = &words[1..];
    }
    while let Some((last, rest)) = words.split_last() {
        if DANGLING_WORDS.contains(&last.norm.as_str()) {
            words = rest;
        } else {
            break;
        }
    }
    words
        .iter()
        .map(|t| t.raw.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | '-'))
        .trim()
        .to_string()
}

/// The words no rule consumed, as typed
fn unmatched(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.raw.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses `input` relative to `now`. Deterministic for the same `now`.
pub fn parse_event(input: &str, now: NaiveDateTime) -> Result<EventDraft, ParseFailure> {
    let input = input.trim();
    let mut tokens = tokenize(input);
    let mut filled: Vec<Slot> = Vec::new();
    let mut extracted = Extracted::default();
    let mut matched_rules = Vec::new();

    for rule in RULES {
        if rule.slots.iter().any(|slot| filled.contains(slot)) {
            continue;
        }
        if let Some(m) = (rule.matcher)(&tokens, now) {
            tokens.drain(m.start..m.start + m.len);
            filled.extend_from_slice(rule.slots);
            extracted.add(m.fragment);
            matched_rules.push(rule.name);
        }
    }

    if !extracted.has_temporal_phrase() {
        return Err(ParseFailure::NoTemporalPhrase {
            remainder: unmatched(&tokens),
        });
    }

    let title = build_title(&tokens);
    if title.is_empty() {
        return Err(ParseFailure::EmptyTitle {
            remainder: unmatched(&tokens),
        });
    }

    Ok(EventDraft {
        title,
        start: extracted.resolve_start(now),
        duration: extracted
            .duration
            .unwrap_or_else(|| Duration::minutes(DEFAULT_DURATION_MINUTES)),
        recurrence: extracted.recurrence.map(|(rule, _)| rule),
        location: extracted.location,
        reminder_minutes_before: extracted.reminder,
        matched_rules,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::recurrence::Frequency;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    // A Wednesday morning
    fn now() -> NaiveDateTime {
        dt("2024-03-13T10:00")
    }

    fn parse(input: &str) -> EventDraft {
        parse_event(input, now()).unwrap()
    }

    #[test]
    fn meeting_tomorrow_afternoon() {
        let draft = parse("Meeting tomorrow at 2pm");
        assert_eq!(draft.title, "Meeting");
        assert_eq!(draft.start, dt("2024-03-14T14:00"));
        assert_eq!(draft.duration, Duration::hours(1));
        assert_eq!(draft.recurrence, None);
        assert_eq!(draft.matched_rules, vec!["relative_day", "clock_time"]);
    }

    #[test]
    fn weekly_standup_keeps_adverb_in_title() {
        let draft = parse("Weekly standup every Monday at 9am");
        assert_eq!(draft.title, "Weekly standup");
        assert_eq!(draft.start, dt("2024-03-18T09:00"));
        assert_eq!(draft.recurrence, Some(RecurrenceRule::new(Frequency::Weekly)));
    }

    #[test]
    fn weekday_is_never_today() {
        let draft = parse("Review on Wednesday");
        assert_eq!(draft.start, dt("2024-03-20T09:00"));
    }

    #[test]
    fn time_without_date_rolls_over_when_past() {
        assert_eq!(parse("Lunch at noon").start, dt("2024-03-13T12:00"));
        assert_eq!(parse("Call mom at 8am").start, dt("2024-03-14T08:00"));
        assert_eq!(parse("Call mom at 8am").title, "Call mom");
    }

    #[test]
    fn interval_recurrence_with_weekday_and_time() {
        let draft = parse("Team sync every 2 weeks on Tuesday at 10:30");
        assert_eq!(draft.title, "Team sync");
        assert_eq!(draft.start, dt("2024-03-19T10:30"));
        assert_eq!(
            draft.recurrence,
            Some(RecurrenceRule::new(Frequency::Weekly).with_interval(2))
        );
    }

    #[test]
    fn relative_moment() {
        let draft = parse("Review draft in 30 minutes");
        assert_eq!(draft.title, "Review draft");
        assert_eq!(draft.start, dt("2024-03-13T10:30"));
    }

    #[test]
    fn explicit_dates_default_to_nine() {
        assert_eq!(parse("Report due 2024-04-01").start, dt("2024-04-01T09:00"));
        assert_eq!(parse("Anniversary 5 January").start, dt("2025-01-05T09:00"));
        let draft = parse("Birthday party March 20th at 7pm");
        assert_eq!(draft.title, "Birthday party");
        assert_eq!(draft.start, dt("2024-03-20T19:00"));
    }

    #[test]
    fn duration_location_and_reminder() {
        let draft = parse("Dentist on Friday for 45 minutes @clinic remind me 30 minutes before");
        assert_eq!(draft.title, "Dentist");
        assert_eq!(draft.start, dt("2024-03-15T09:00"));
        assert_eq!(draft.duration, Duration::minutes(45));
        assert_eq!(draft.location, Some("clinic".into()));
        assert_eq!(draft.reminder_minutes_before, Some(30));
    }

    #[test]
    fn command_word_and_long_duration() {
        let draft = parse("Schedule planning session next week for an hour and a half");
        assert_eq!(draft.title, "planning session");
        assert_eq!(draft.start, dt("2024-03-18T09:00"));
        assert_eq!(draft.duration, Duration::minutes(90));
    }

    #[test]
    fn daily_and_every_other() {
        let draft = parse("Gym daily at 6pm");
        assert_eq!(draft.title, "Gym");
        assert_eq!(draft.start, dt("2024-03-13T18:00"));
        assert_eq!(draft.recurrence, Some(RecurrenceRule::new(Frequency::Daily)));

        let draft = parse("Yoga every other Saturday morning");
        assert_eq!(draft.title, "Yoga");
        assert_eq!(draft.start, dt("2024-03-16T09:00"));
        assert_eq!(
            draft.recurrence,
            Some(RecurrenceRule::new(Frequency::Weekly).with_interval(2))
        );
    }

    #[test]
    fn it_never_guesses_a_date() {
        let err = parse_event("  Just some words ", now()).unwrap_err();
        assert_eq!(
            err,
            ParseFailure::NoTemporalPhrase {
                remainder: "Just some words".into()
            }
        );
        assert_eq!(err.remainder(), "Just some words");

        let err = parse_event("Dentist for 45 minutes @clinic", now()).unwrap_err();
        assert_eq!(
            err,
            ParseFailure::NoTemporalPhrase {
                remainder: "Dentist".into()
            }
        );
    }

    #[test]
    fn it_rejects_empty_titles() {
        assert_eq!(
            parse_event("tomorrow at 5pm", now()),
            Err(ParseFailure::EmptyTitle {
                remainder: String::new()
            })
        );
        assert_eq!(
            parse_event("Tomorrow at 5pm and", now()).unwrap_err().remainder(),
            "and"
        );
        assert!(matches!(
            parse_event("", now()),
            Err(ParseFailure::NoTemporalPhrase { .. })
        ));
    }

    #[test]
    fn huge_durations_do_not_overflow() {
        let draft = parse("Nap tomorrow for 153722867280912930 hours and a half");
        assert_eq!(draft.duration, Duration::hours(1));
        assert_eq!(draft.title, "Nap for 153722867280912930 hours and a half");
    }

    #[test]
    fn zero_interval_is_not_a_recurrence() {
        let draft = parse("Water plants every 0 days at 8pm");
        assert_eq!(draft.recurrence, None);
        assert_eq!(draft.start, dt("2024-03-13T20:00"));
    }

    #[test]
    fn it_is_deterministic() {
        let input = "Coffee @corner tomorrow evening for 30 min";
        assert_eq!(parse(input), parse(input));
        assert_eq!(parse(input).start, dt("2024-03-14T18:00"));
        assert_eq!(parse(input).title, "Coffee");
    }

    #[test]
    fn draft_converts_to_event() {
        let draft = parse("Gym daily at 6pm @club");
        let event = draft.to_event(now());
        assert!(event.validate().is_ok());
        assert_eq!(event.location, Some("club".into()));
        assert_eq!(event.recurrence, draft.recurrence);
    }
}

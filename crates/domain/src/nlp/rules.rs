use super::token::Token;
use crate::date::{add_months, next_weekday, parse_iso_date};
use crate::shared::recurrence::{Frequency, RecurrenceRule};
use chrono::{prelude::*, Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Reminder,
    Recurrence,
    Duration,
    Date,
    Time,
    Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Minutes before the start
    Reminder(i64),
    Recurrence {
        rule: RecurrenceRule,
        weekday: Option<Weekday>,
    },
    Duration(Duration),
    /// Fully resolved start, fills both date and time
    Moment(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Location(String),
}

#[derive(Debug)]
pub struct Match {
    pub start: usize,
    pub len: usize,
    pub fragment: Fragment,
}

pub struct Rule {
    pub name: &'static str,
    pub slots: &'static [Slot],
    pub matcher: fn(&[Token], NaiveDateTime) -> Option<Match>,
}

/// Highest priority first
pub const RULES: &[Rule] = &[
    Rule {
        name: "reminder",
        slots: &[Slot::Reminder],
        matcher: reminder,
    },
    Rule {
        name: "every_weekday",
        slots: &[Slot::Recurrence],
        matcher: every_weekday,
    },
    Rule {
        name: "every_n_units",
        slots: &[Slot::Recurrence],
        matcher: every_n_units,
    },
    Rule {
        name: "every_unit",
        slots: &[Slot::Recurrence],
        matcher: every_unit,
    },
    Rule {
        name: "recurrence_adverb",
        slots: &[Slot::Recurrence],
        matcher: recurrence_adverb,
    },
    Rule {
        name: "duration",
        slots: &[Slot::Duration],
        matcher: duration,
    },
    Rule {
        name: "relative_moment",
        slots: &[Slot::Date, Slot::Time],
        matcher: relative_moment,
    },
    Rule {
        name: "relative_day",
        slots: &[Slot::Date],
        matcher: relative_day,
    },
    Rule {
        name: "in_n_days",
        slots: &[Slot::Date],
        matcher: in_n_days,
    },
    Rule {
        name: "next_week",
        slots: &[Slot::Date],
        matcher: next_week,
    },
    Rule {
        name: "weekday",
        slots: &[Slot::Date],
        matcher: weekday,
    },
    Rule {
        name: "iso_date",
        slots: &[Slot::Date],
        matcher: iso_date,
    },
    Rule {
        name: "month_day",
        slots: &[Slot::Date],
        matcher: month_day,
    },
    Rule {
        name: "day_month",
        slots: &[Slot::Date],
        matcher: day_month,
    },
    Rule {
        name: "clock_time",
        slots: &[Slot::Time],
        matcher: clock_time,
    },
    Rule {
        name: "named_time",
        slots: &[Slot::Time],
        matcher: named_time,
    },
    Rule {
        name: "location",
        slots: &[Slot::Location],
        matcher: location,
    },
];

/// Tries `matcher` at every token position, leftmost match wins.
/// The closure returns how many tokens it consumed.
fn scan(
    tokens: &[Token],
    matcher: impl Fn(&[Token]) -> Option<(usize, Fragment)>,
) -> Option<Match> {
    (0..tokens.len()).find_map(|start| {
        matcher(&tokens[start..]).map(|(len, fragment)| Match {
            start,
            len,
            fragment,
        })
    })
}

fn is(tokens: &[Token], i: usize, word: &str) -> bool {
    tokens.get(i).map(|t| t.norm == word).unwrap_or(false)
}

fn norm(tokens: &[Token], i: usize) -> Option<&str> {
    tokens.get(i).map(|t| t.norm.as_str())
}

fn parse_number(word: &str) -> Option<i64> {
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        return word.parse().ok();
    }
    let n = match word {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "fifteen" => 15,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "forty-five" => 45,
        "sixty" => 60,
        "ninety" => 90,
        _ => return None,
    };
    Some(n)
}

/// `N unit` as two tokens or `Nunit` as one, e.g. "90 minutes" or "90min".
/// Returns the consumed token count, the amount and the unit word.
fn amount(tokens: &[Token]) -> Option<(usize, i64, &str)> {
    let first = norm(tokens, 0)?;
    if let Some(n) = parse_number(first) {
        return Some((2, n, norm(tokens, 1)?));
    }
    let split = first.find(|c: char| !c.is_ascii_digit())?;
    let (digits, unit) = first.split_at(split);
    Some((1, parse_number(digits)?, unit))
}

fn unit_minutes(unit: &str) -> Option<i64> {
    match unit {
        "m" | "min" | "mins" | "minute" | "minutes" => Some(1),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(60),
        "day" | "days" => Some(24 * 60),
        "week" | "weeks" => Some(7 * 24 * 60),
        _ => None,
    }
}

fn calendar_unit(unit: &str) -> Option<Frequency> {
    match unit {
        "day" | "days" => Some(Frequency::Daily),
        "week" | "weeks" => Some(Frequency::Weekly),
        "month" | "months" => Some(Frequency::Monthly),
        _ => None,
    }
}

fn parse_weekday(word: &str, allow_abbreviation: bool) -> Option<Weekday> {
    let weekday = match word {
        "monday" => Weekday::Mon,
        "tuesday" => Weekday::Tue,
        "wednesday" => Weekday::Wed,
        "thursday" => Weekday::Thu,
        "friday" => Weekday::Fri,
        "saturday" => Weekday::Sat,
        "sunday" => Weekday::Sun,
        _ if !allow_abbreviation => return None,
        "mon" => Weekday::Mon,
        "tue" | "tues" => Weekday::Tue,
        "wed" => Weekday::Wed,
        "thu" | "thur" | "thurs" => Weekday::Thu,
        "fri" => Weekday::Fri,
        "sat" => Weekday::Sat,
        "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

fn parse_month(word: &str) -> Option<u32> {
    let month = match word {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// "14", "14th", "1st"
fn parse_day(word: &str) -> Option<u32> {
    let digits = word.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &word[digits.len()..];
    if !matches!(suffix, "" | "st" | "nd" | "rd" | "th") || digits.is_empty() || digits.len() > 2 {
        return None;
    }
    let day = digits.parse::<u32>().ok()?;
    if (1..=31).contains(&day) {
        Some(day)
    } else {
        None
    }
}

fn parse_year(word: Option<&str>) -> Option<i32> {
    let word = word?;
    if word.len() != 4 {
        return None;
    }
    word.parse::<i32>()
        .ok()
        .filter(|year| (1970..=2100).contains(year))
}

/// Next date with this month and day on or after `today`
fn upcoming_date(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    (today.year()..today.year() + 8)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .find(|date| *date >= today)
}

fn date_with_optional_year(
    tokens: &[Token],
    year_at: usize,
    month: u32,
    day: u32,
    today: NaiveDate,
) -> Option<(usize, NaiveDate)> {
    match parse_year(norm(tokens, year_at)) {
        Some(year) => NaiveDate::from_ymd_opt(year, month, day).map(|date| (year_at + 1, date)),
        None => upcoming_date(today, month, day).map(|date| (year_at, date)),
    }
}

fn is_meridiem(word: &str) -> Option<bool> {
    match word {
        "am" | "a.m" => Some(false),
        "pm" | "p.m" => Some(true),
        _ => None,
    }
}

/// "9", "9:30", "14:05"
fn parse_hour_minute(word: &str) -> Option<(u32, u32)> {
    let mut parts = word.splitn(2, ':');
    let hour = parts.next()?;
    let minute = parts.next();
    if hour.is_empty() || hour.len() > 2 || !hour.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let minute = match minute {
        Some(m) if m.len() == 2 && m.chars().all(|c| c.is_ascii_digit()) => m.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    Some((hour.parse().ok()?, minute))
}

fn twelve_hour(hour: u32, minute: u32, pm: bool) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// A clock time at the head of `tokens`. A bare hour like "5" is only
/// accepted when `allow_bare` is set, i.e. after "at".
fn parse_clock(tokens: &[Token], allow_bare: bool) -> Option<(usize, NaiveTime)> {
    let first = norm(tokens, 0)?;

    for suffix in ["am", "pm", "a.m", "p.m"] {
        if let Some(clock) = first.strip_suffix(suffix) {
            if let (Some((hour, minute)), Some(pm)) = (parse_hour_minute(clock), is_meridiem(suffix)) {
                return twelve_hour(hour, minute, pm).map(|time| (1, time));
            }
        }
    }

    let (hour, minute) = parse_hour_minute(first)?;
    if let Some(pm) = norm(tokens, 1).and_then(is_meridiem) {
        return twelve_hour(hour, minute, pm).map(|time| (2, time));
    }
    if is(tokens, 1, "o'clock") {
        return NaiveTime::from_hms_opt(hour, 0, 0).map(|time| (2, time));
    }
    if first.contains(':') || allow_bare {
        return NaiveTime::from_hms_opt(hour, minute, 0).map(|time| (1, time));
    }
    None
}

fn named_time_of_day(word: &str) -> Option<NaiveTime> {
    let hour = match word {
        "midnight" => 0,
        "morning" => 9,
        "noon" | "midday" => 12,
        "afternoon" => 14,
        "evening" => 18,
        "night" | "tonight" => 20,
        _ => return None,
    };
    NaiveTime::from_hms_opt(hour, 0, 0)
}

fn reminder(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        if !is(t, 0, "remind") || !is(t, 1, "me") {
            return None;
        }
        let (len, n, unit) = amount(&t[2..])?;
        if !is(t, 2 + len, "before") {
            return None;
        }
        let minutes = unit_minutes(unit)?.checked_mul(n)?;
        Some((3 + len, Fragment::Reminder(minutes)))
    })
}

fn every_weekday(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        if !is(t, 0, "every") {
            return None;
        }
        let (skip, interval) = if is(t, 1, "other") { (2, 2) } else { (1, 1) };
        let word = norm(t, skip)?;
        let weekday = parse_weekday(word, true)
            .or_else(|| parse_weekday(word.strip_suffix('s')?, false))?;
        Some((
            skip + 1,
            Fragment::Recurrence {
                rule: RecurrenceRule::new(Frequency::Weekly).with_interval(interval),
                weekday: Some(weekday),
            },
        ))
    })
}

fn every_n_units(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        if !is(t, 0, "every") {
            return None;
        }
        let (len, interval, unit) = if is(t, 1, "other") {
            (2, 2, norm(t, 2)?)
        } else {
            amount(&t[1..])?
        };
        if interval < 1 {
            return None;
        }
        let frequency = calendar_unit(unit)?;
        Some((
            1 + len,
            Fragment::Recurrence {
                rule: RecurrenceRule::new(frequency).with_interval(interval),
                weekday: None,
            },
        ))
    })
}

fn every_unit(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        if !is(t, 0, "every") {
            return None;
        }
        let frequency = match norm(t, 1)? {
            "day" => Frequency::Daily,
            "week" => Frequency::Weekly,
            "month" => Frequency::Monthly,
            _ => return None,
        };
        Some((
            2,
            Fragment::Recurrence {
                rule: RecurrenceRule::new(frequency),
                weekday: None,
            },
        ))
    })
}

fn recurrence_adverb(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        let frequency = match norm(t, 0)? {
            "daily" | "everyday" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            _ => return None,
        };
        Some((
            1,
            Fragment::Recurrence {
                rule: RecurrenceRule::new(frequency),
                weekday: None,
            },
        ))
    })
}

fn duration(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        if !is(t, 0, "for") {
            return None;
        }
        if is(t, 1, "half") && is(t, 2, "an") && is(t, 3, "hour") {
            return Some((4, Fragment::Duration(Duration::minutes(30))));
        }
        // "1.5 hours"
        if let (Some(hours), Some(60)) = (
            norm(t, 1).and_then(|w| w.parse::<f64>().ok()),
            norm(t, 2).and_then(unit_minutes),
        ) {
            if hours.fract() != 0.0 && hours > 0.0 && hours < 24.0 {
                let minutes = (hours * 60.0).round() as i64;
                return Some((3, Fragment::Duration(Duration::minutes(minutes))));
            }
        }
        let (len, n, unit) = amount(&t[1..])?;
        let per_unit = unit_minutes(unit)?;
        let mut minutes = per_unit.checked_mul(n)?;
        let mut consumed = 1 + len;
        // "for an hour and a half"
        if per_unit == 60 && is(t, consumed, "and") && is(t, consumed + 1, "a") && is(t, consumed + 2, "half") {
            minutes = minutes.checked_add(30)?;
            consumed += 3;
        }
        Some((consumed, Fragment::Duration(Duration::try_minutes(minutes)?)))
    })
}

fn relative_moment(tokens: &[Token], now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        if !is(t, 0, "in") {
            return None;
        }
        let (len, n, unit) = amount(&t[1..])?;
        let per_unit = unit_minutes(unit).filter(|m| *m <= 60)?;
        let offset = Duration::try_minutes(per_unit.checked_mul(n)?)?;
        Some((1 + len, Fragment::Moment(now.checked_add_signed(offset)?)))
    })
}

fn relative_day(tokens: &[Token], now: NaiveDateTime) -> Option<Match> {
    let today = now.date();
    scan(tokens, |t| {
        if is(t, 0, "day") && is(t, 1, "after") && is(t, 2, "tomorrow") {
            return Some((3, Fragment::Date(today + Duration::days(2))));
        }
        match norm(t, 0)? {
            "today" => Some((1, Fragment::Date(today))),
            "tomorrow" | "tmrw" => Some((1, Fragment::Date(today + Duration::days(1)))),
            _ => None,
        }
    })
}

fn in_n_days(tokens: &[Token], now: NaiveDateTime) -> Option<Match> {
    let today = now.date();
    scan(tokens, |t| {
        if !is(t, 0, "in") {
            return None;
        }
        let (len, n, unit) = amount(&t[1..])?;
        let date = match calendar_unit(unit)? {
            Frequency::Daily => today.checked_add_signed(Duration::try_days(n)?)?,
            Frequency::Weekly => today.checked_add_signed(Duration::try_weeks(n)?)?,
            Frequency::Monthly => add_months(today, n)?,
        };
        Some((1 + len, Fragment::Date(date)))
    })
}

fn next_week(tokens: &[Token], now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        if is(t, 0, "next") && is(t, 1, "week") {
            Some((2, Fragment::Date(next_weekday(now.date(), Weekday::Mon))))
        } else {
            None
        }
    })
}

/// "[on|next|this] <weekday>", always strictly after today
fn weekday(tokens: &[Token], now: NaiveDateTime) -> Option<Match> {
    let today = now.date();
    scan(tokens, |t| {
        let first = norm(t, 0)?;
        if matches!(first, "on" | "next" | "this" | "coming") {
            if let Some(weekday) = norm(t, 1).and_then(|w| parse_weekday(w, true)) {
                return Some((2, Fragment::Date(next_weekday(today, weekday))));
            }
        }
        parse_weekday(first, false).map(|weekday| (1, Fragment::Date(next_weekday(today, weekday))))
    })
}

fn iso_date(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        let skip = usize::from(is(t, 0, "on"));
        parse_iso_date(norm(t, skip)?).map(|date| (skip + 1, Fragment::Date(date)))
    })
}

/// "[on] March 14[th] [2025]"
fn month_day(tokens: &[Token], now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        let skip = usize::from(is(t, 0, "on"));
        let month = parse_month(norm(t, skip)?)?;
        let day = parse_day(norm(t, skip + 1)?)?;
        let (len, date) = date_with_optional_year(t, skip + 2, month, day, now.date())?;
        Some((len, Fragment::Date(date)))
    })
}

/// "[on] [the] 14[th] [of] March [2025]"
fn day_month(tokens: &[Token], now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        let mut i = usize::from(is(t, 0, "on"));
        if is(t, i, "the") {
            i += 1;
        }
        let day = parse_day(norm(t, i)?)?;
        i += 1;
        if is(t, i, "of") {
            i += 1;
        }
        let month = parse_month(norm(t, i)?)?;
        let (len, date) = date_with_optional_year(t, i + 1, month, day, now.date())?;
        Some((len, Fragment::Date(date)))
    })
}

fn clock_time(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        if is(t, 0, "at") {
            if let Some((len, time)) = parse_clock(&t[1..], true) {
                return Some((len + 1, Fragment::Time(time)));
            }
        }
        parse_clock(t, false).map(|(len, time)| (len, Fragment::Time(time)))
    })
}

fn named_time(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        let skip = if is(t, 0, "in") && is(t, 1, "the") {
            2
        } else if is(t, 0, "this") || is(t, 0, "at") {
            1
        } else {
            0
        };
        if let Some(time) = norm(t, skip).and_then(named_time_of_day) {
            return Some((skip + 1, Fragment::Time(time)));
        }
        named_time_of_day(norm(t, 0)?).map(|time| (1, Fragment::Time(time)))
    })
}

fn location(tokens: &[Token], _now: NaiveDateTime) -> Option<Match> {
    scan(tokens, |t| {
        let raw = t.first()?.raw.as_str();
        let place = raw.strip_prefix('@')?;
        let place = place.trim_end_matches(|c: char| matches!(c, ',' | '.' | '!' | '?' | ';'));
        if !place.is_empty() {
            return Some((1, Fragment::Location(place.to_string())));
        }
        t.get(1)
            .map(|next| (2, Fragment::Location(next.norm.clone())))
    })
}

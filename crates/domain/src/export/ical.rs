use crate::{event::CalendarEvent, occurrence::Occurrence};
use chrono::prelude::*;

pub const PRODID: &str = "-//Faith Forward//Planner//EN";

const MAX_LINE_OCTETS: usize = 75;
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// One occurrence together with the event text needed to render it
#[derive(Debug, Clone, PartialEq)]
pub struct ExportEntry {
    pub occurrence: Occurrence,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl ExportEntry {
    pub fn new(event: &CalendarEvent, occurrence: Occurrence) -> Self {
        Self {
            occurrence,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
        }
    }
}

/// Stable per occurrence, so re-exporting a recurring event yields the
/// same UIDs.
pub fn occurrence_uid(occurrence: &Occurrence) -> String {
    format!(
        "{}-{}",
        occurrence.event_id,
        occurrence.start.format(DATE_TIME_FORMAT)
    )
}

/// Renders a VCALENDAR with one VEVENT per entry. DTSTART and DTEND are
/// floating local times, DTSTAMP is UTC.
pub fn render_calendar(entries: &[ExportEntry], stamp: DateTime<Utc>) -> String {
    let stamp = format!("{}Z", stamp.format(DATE_TIME_FORMAT));
    let mut out = String::new();
    out.push_str(&fold_line("BEGIN:VCALENDAR"));
    out.push_str(&fold_line("VERSION:2.0"));
    out.push_str(&fold_line(&format!("PRODID:{}", PRODID)));
    out.push_str(&fold_line("CALSCALE:GREGORIAN"));
    for entry in entries {
        let occurrence = &entry.occurrence;
        out.push_str(&fold_line("BEGIN:VEVENT"));
        out.push_str(&fold_line(&format!("UID:{}", occurrence_uid(occurrence))));
        out.push_str(&fold_line(&format!("DTSTAMP:{}", stamp)));
        out.push_str(&fold_line(&format!(
            "DTSTART:{}",
            occurrence.start.format(DATE_TIME_FORMAT)
        )));
        out.push_str(&fold_line(&format!(
            "DTEND:{}",
            occurrence.end.format(DATE_TIME_FORMAT)
        )));
        out.push_str(&fold_line(&format!("SUMMARY:{}", escape_text(&entry.title))));
        if let Some(description) = &entry.description {
            out.push_str(&fold_line(&format!(
                "DESCRIPTION:{}",
                escape_text(description)
            )));
        }
        if let Some(location) = &entry.location {
            out.push_str(&fold_line(&format!("LOCATION:{}", escape_text(location))));
        }
        out.push_str(&fold_line("END:VEVENT"));
    }
    out.push_str(&fold_line("END:VCALENDAR"));
    out
}

fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Folds a content line at 75 octets without splitting a UTF-8 sequence.
/// Continuation lines start with a single space.
fn fold_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS) * 3 + 2);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            result.push_str("\r\n ");
            width = 1;
        }
        result.push(c);
        width += len;
    }
    result.push_str("\r\n");
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::entity::ID;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn entry(title: &str) -> ExportEntry {
        ExportEntry {
            occurrence: Occurrence {
                event_id: ID::new(),
                start: dt("2024-03-14T14:00"),
                end: dt("2024-03-14T15:00"),
            },
            title: title.into(),
            description: Some("Bring notes; slides, and\nsnacks".into()),
            location: None,
        }
    }

    #[test]
    fn escape_text_basic() {
        assert_eq!(escape_text("hello, world"), "hello\\, world");
        assert_eq!(escape_text("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_text("back\\slash"), "back\\\\slash");
        assert_eq!(escape_text("semi;colon"), "semi\\;colon");
    }

    #[test]
    fn fold_keeps_lines_within_limit() {
        let line = format!("SUMMARY:{}", "é".repeat(60));
        let folded = fold_line(&line);
        assert!(folded.ends_with("\r\n"));
        for part in folded.trim_end_matches("\r\n").split("\r\n") {
            assert!(part.len() <= MAX_LINE_OCTETS);
        }
        let unfolded = folded.trim_end_matches("\r\n").replace("\r\n ", "");
        assert_eq!(unfolded, line);
    }

    #[test]
    fn short_lines_are_not_folded() {
        assert_eq!(fold_line("BEGIN:VEVENT"), "BEGIN:VEVENT\r\n");
    }

    #[test]
    fn it_renders_one_vevent_per_entry() {
        let entries = vec![entry("Meeting"), entry("Lunch")];
        let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let ics = render_calendar(&entries, stamp);

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("DTSTART:20240314T140000\r\n"));
        assert!(ics.contains("DTEND:20240314T150000\r\n"));
        assert!(ics.contains("DTSTAMP:20240301T120000Z\r\n"));
        assert!(ics.contains("DESCRIPTION:Bring notes\\; slides\\, and\\nsnacks\r\n"));
        assert!(ics.contains(&format!(
            "UID:{}-20240314T140000\r\n",
            entries[0].occurrence.event_id
        )));
        assert!(!ics.contains("LOCATION"));
    }
}

use crate::{event::CalendarEvent, shared::entity::ID, shared::recurrence::RecurrenceRule, timespan::TimeSpan};
use chrono::{prelude::*, Duration};
use serde::{Deserialize, Serialize};

/// Concrete occurrence of a `CalendarEvent`, half-open `[start, end)`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub event_id: ID,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Occurrence {
    /// Two occurrences conflict when their half-open ranges intersect.
    /// Touching occurrences do not conflict.
    pub fn conflicts_with(&self, other: &Occurrence) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection with a closed query span. Zero-length occurrences
    /// intersect when their start lies inside it.
    pub fn intersects(&self, span: &TimeSpan) -> bool {
        if self.start == self.end {
            span.contains(self.start)
        } else {
            self.start <= span.end() && self.end > span.start()
        }
    }
}

/// Lazy iterator over the occurrences of one event inside a query span.
/// Cloning it restarts from the same position.
#[derive(Clone, Debug)]
pub struct Occurrences {
    event_id: ID,
    anchor: NaiveDateTime,
    duration: Duration,
    rule: Option<RecurrenceRule>,
    span: TimeSpan,
    next_index: i64,
    done: bool,
}

impl Occurrences {
    pub(crate) fn new(event: &CalendarEvent, span: TimeSpan) -> Self {
        // Occurrences starting before the span may still reach into it
        let from = span
            .start()
            .checked_sub_signed(event.duration)
            .unwrap_or(span.start());
        let next_index = event
            .recurrence
            .map(|rule| rule.index_near(event.start, from))
            .unwrap_or(0);
        Self {
            event_id: event.id.clone(),
            anchor: event.start,
            duration: event.duration,
            rule: event.recurrence,
            span,
            next_index,
            done: false,
        }
    }

    fn occurrence_at(&self, start: NaiveDateTime) -> Occurrence {
        Occurrence {
            event_id: self.event_id.clone(),
            start,
            end: start
                .checked_add_signed(self.duration)
                .unwrap_or(NaiveDateTime::MAX),
        }
    }
}

impl Iterator for Occurrences {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let rule = match self.rule {
            Some(rule) => rule,
            None => {
                self.done = true;
                let occurrence = self.occurrence_at(self.anchor);
                return if occurrence.intersects(&self.span) {
                    Some(occurrence)
                } else {
                    None
                };
            }
        };

        loop {
            let k = self.next_index;
            let start = match rule.nth_start(self.anchor, k) {
                Some(start) if rule.allows(k, start) && start <= self.span.end() => start,
                _ => {
                    self.done = true;
                    return None;
                }
            };
            self.next_index += 1;
            let occurrence = self.occurrence_at(start);
            if occurrence.intersects(&self.span) {
                return Some(occurrence);
            }
        }
    }
}

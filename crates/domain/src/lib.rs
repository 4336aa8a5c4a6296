pub mod date;
mod event;
pub mod export;
pub mod nlp;
mod occurrence;
mod reminder;
mod shared;
pub mod time_block;
mod timespan;

pub use event::{CalendarEvent, EventPatch, EventValidationError};
pub use occurrence::{Occurrence, Occurrences};
pub use reminder::{Reminder, ReminderTrigger, MAX_REMINDER_OFFSET_MINUTES};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::{Frequency, RecurrenceEnd, RecurrenceRule, MAX_RECURRENCE_COUNT};
pub use timespan::{InvalidTimeSpanError, TimeSpan};

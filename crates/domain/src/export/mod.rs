mod ical;

pub use ical::{occurrence_uid, render_calendar, ExportEntry, PRODID};

//! Turns free text like "Weekly standup every Monday at 9am" into an
//! `EventDraft`.
//!
//! The input is split into tokens and an ordered table of rules is tried
//! against them. Every rule fills one or more slots (date, time, ...). The
//! first rule to match a slot wins and removes its tokens, later rules for a
//! filled slot are skipped. Whatever is left becomes the title.

mod parser;
mod rules;
mod token;

pub use parser::{parse_event, EventDraft, ParseFailure};

//! ICS file generation and parsing for the local store.
//!
//! Reminders are stored as VTODO components, events as VEVENT components,
//! one item per file.

mod generate;
mod parse;

pub use generate::{generate_event_ics, generate_todo_ics};
pub use parse::{parse_event, parse_todo, parse_uid};

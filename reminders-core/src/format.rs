//! Newline-delimited JSON records for reminders and events.

use std::io::Write;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{RemindersError, RemindersResult};
use crate::event::Event;
use crate::meeting::extract_meeting_url;
use crate::query::due_or;
use crate::reminder::Reminder;
use crate::time::DISPLAY_FORMAT;

/// One reminder as printed by the listing commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderRecord {
    pub uuid: String,
    /// Position in the listing, not a stored identifier
    pub id: String,
    pub title: String,
    pub date: String,
    pub list: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "allDay")]
    pub all_day: String,
    pub location: String,
    pub calendar: String,
    pub confirmed: String,
    pub meeting_url: String,
}

/// A due value that does not resolve is printed as `now`.
pub fn format_reminder(reminder: &Reminder, index: usize, now: DateTime<Local>) -> ReminderRecord {
    let date = match reminder.due {
        Some(_) => due_or(reminder, now).format(DISPLAY_FORMAT).to_string(),
        None => String::new(),
    };

    ReminderRecord {
        uuid: reminder.id.clone(),
        id: index.to_string(),
        title: reminder.display_title().to_string(),
        date,
        list: reminder.collection.title.clone(),
    }
}

pub fn format_event(event: &Event) -> EventRecord {
    EventRecord {
        id: event.id.clone(),
        title: event.display_title().to_string(),
        start: event.start.display_local(),
        end: event.end.display_local(),
        all_day: event.all_day.to_string(),
        location: event
            .location
            .as_deref()
            .unwrap_or_default()
            .replace('\n', ", "),
        calendar: event.collection.title.clone(),
        confirmed: event.status.is_confirmed().to_string(),
        meeting_url: extract_meeting_url(event),
    }
}

/// Records for a whole listing, each tagged with its position.
pub fn reminder_records(reminders: &[Reminder], now: DateTime<Local>) -> Vec<ReminderRecord> {
    reminders
        .iter()
        .enumerate()
        .map(|(i, r)| format_reminder(r, i, now))
        .collect()
}

/// Write one JSON object per line.
pub fn write_json_lines<T: Serialize>(out: &mut impl Write, records: &[T]) -> RemindersResult<()> {
    for record in records {
        let line = serde_json::to_string(record)
            .map_err(|e| RemindersError::Serialization(e.to_string()))?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}

//! ICS file generation.

use crate::error::RemindersResult;
use crate::event::{Event, EventStatus};
use crate::reminder::Reminder;
use crate::time::CalendarTime;
use icalendar::{Calendar, Component, Property, ValueType};

/// Generate .ics content holding a single VTODO.
pub fn generate_todo_ics(reminder: &Reminder) -> RemindersResult<String> {
    let mut todo = icalendar::Todo::new();
    todo.uid(&reminder.id);
    add_dtstamp(&mut todo);

    if let Some(ref title) = reminder.title {
        todo.summary(title);
    }
    if let Some(ref due) = reminder.due {
        add_datetime_property(&mut todo, "DUE", due);
    }
    if let Some(ref notes) = reminder.notes {
        todo.description(notes);
    }
    if let Some(ref location) = reminder.location {
        todo.add_property("LOCATION", location);
    }
    if let Some(ref url) = reminder.url {
        todo.add_property("URL", url);
    }
    if let Some(priority) = reminder.priority {
        todo.add_property("PRIORITY", priority.to_string());
    }

    if reminder.completed {
        todo.add_property("STATUS", "COMPLETED");
        let completed_at = reminder.completed_at.unwrap_or_else(chrono::Utc::now);
        todo.add_property("COMPLETED", completed_at.format("%Y%m%dT%H%M%SZ").to_string());
    } else {
        todo.add_property("STATUS", "NEEDS-ACTION");
    }

    finish(todo.done())
}

/// Generate .ics content holding a single VEVENT.
pub fn generate_event_ics(event: &Event) -> RemindersResult<String> {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.id);
    add_dtstamp(&mut ics_event);

    if let Some(ref title) = event.title {
        ics_event.summary(title);
    }

    add_datetime_property(&mut ics_event, "DTSTART", &event.start);
    add_datetime_property(&mut ics_event, "DTEND", &event.end);

    if let Some(ref location) = event.location {
        ics_event.add_property("LOCATION", location);
    }
    if let Some(ref notes) = event.notes {
        ics_event.description(notes);
    }
    if let Some(ref url) = event.url {
        ics_event.add_property("URL", url);
    }

    // Absence of STATUS is meaningful ("none"), so only emit explicit ones
    match event.status {
        EventStatus::None => {}
        EventStatus::Confirmed => {
            ics_event.add_property("STATUS", "CONFIRMED");
        }
        EventStatus::Tentative => {
            ics_event.add_property("STATUS", "TENTATIVE");
        }
        EventStatus::Cancelled => {
            ics_event.add_property("STATUS", "CANCELLED");
        }
    }

    finish(ics_event.done())
}

fn finish(component: impl Into<icalendar::CalendarComponent>) -> RemindersResult<String> {
    let mut cal = Calendar::new();
    cal.push(component);
    Ok(strip_ics_bloat(&cal.done().to_string()))
}

/// DTSTAMP is required by RFC 5545
fn add_dtstamp<C: Component>(component: &mut C) {
    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    component.add_property("DTSTAMP", &dtstamp);
}

/// Replace PRODID and drop CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:REMINDERS\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a datetime property with proper formatting based on CalendarTime variant
fn add_datetime_property<C: Component>(component: &mut C, name: &str, time: &CalendarTime) {
    match time {
        CalendarTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            component.append_property(prop);
        }
        CalendarTime::DateTimeUtc(dt) => {
            component.add_property(name, dt.format("%Y%m%dT%H%M%SZ").to_string());
        }
        CalendarTime::DateTimeFloating(dt) => {
            component.add_property(name, dt.format("%Y%m%dT%H%M%S").to_string());
        }
        CalendarTime::DateTimeZoned { datetime, tzid } => {
            let mut prop = Property::new(name, datetime.format("%Y%m%dT%H%M%S").to_string());
            prop.add_parameter("TZID", tzid);
            component.append_property(prop);
        }
    }
}

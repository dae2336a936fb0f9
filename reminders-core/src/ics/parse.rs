//! ICS file parsing using the icalendar crate's parser.

use crate::collection::Collection;
use crate::event::{Event, EventStatus};
use crate::reminder::Reminder;
use crate::time::CalendarTime;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use icalendar::{
    DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

/// Parse a VTODO into a Reminder owned by `collection`.
pub fn parse_todo(content: &str, collection: &Collection) -> Option<Reminder> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vtodo = calendar.components.iter().find(|c| c.name == "VTODO")?;

    let id = vtodo.find_prop("UID")?.val.to_string();
    let due = vtodo
        .find_prop("DUE")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(to_calendar_time);

    let status = vtodo.find_prop("STATUS").map(|p| p.val.to_string());
    let completed_at = vtodo
        .find_prop("COMPLETED")
        .and_then(|p| parse_utc_stamp(p.val.as_ref()));
    let completed = status.as_deref() == Some("COMPLETED") || completed_at.is_some();

    let priority = vtodo
        .find_prop("PRIORITY")
        .and_then(|p| p.val.as_ref().parse::<u8>().ok())
        .filter(|p| *p <= 9);

    Some(Reminder {
        id,
        title: text_prop(vtodo, "SUMMARY"),
        due,
        completed,
        completed_at,
        priority,
        notes: text_prop(vtodo, "DESCRIPTION"),
        url: vtodo.find_prop("URL").map(|p| p.val.to_string()),
        location: text_prop(vtodo, "LOCATION"),
        collection: collection.clone(),
    })
}

/// Parse a VEVENT into an Event owned by `collection`.
///
/// A missing DTEND defaults to one hour after DTSTART (one day for
/// date-only starts).
pub fn parse_event(content: &str, collection: &Collection) -> Option<Event> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    let id = vevent.find_prop("UID")?.val.to_string();
    let start = to_calendar_time(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);
    let all_day = start.is_date_only();
    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(to_calendar_time)
        .unwrap_or_else(|| {
            if all_day {
                start.add(Duration::days(1))
            } else {
                start.add(Duration::hours(1))
            }
        });

    let status = vevent
        .find_prop("STATUS")
        .map(|p| match p.val.as_ref() {
            "CONFIRMED" => EventStatus::Confirmed,
            "TENTATIVE" => EventStatus::Tentative,
            "CANCELLED" => EventStatus::Cancelled,
            _ => EventStatus::None,
        })
        .unwrap_or(EventStatus::None);

    Some(Event {
        id,
        title: text_prop(vevent, "SUMMARY"),
        start,
        end,
        all_day,
        location: text_prop(vevent, "LOCATION"),
        notes: text_prop(vevent, "DESCRIPTION"),
        url: vevent.find_prop("URL").map(|p| p.val.to_string()),
        status,
        collection: collection.clone(),
    })
}

/// UID of the first VTODO or VEVENT in the content.
pub fn parse_uid(content: &str) -> Option<String> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    calendar
        .components
        .iter()
        .find(|c| c.name == "VTODO" || c.name == "VEVENT")?
        .find_prop("UID")
        .map(|p| p.val.to_string())
}

/// The parser has already undone TEXT escaping.
fn text_prop(component: &Component, name: &str) -> Option<String> {
    component.find_prop(name).map(|p| p.val.to_string())
}

fn parse_utc_stamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim_end_matches('Z'), "%Y%m%dT%H%M%S")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Convert icalendar's DatePerhapsTime to our CalendarTime, preserving timezone info
fn to_calendar_time(dpt: DatePerhapsTime) -> CalendarTime {
    match dpt {
        DatePerhapsTime::Date(d) => CalendarTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            icalendar::CalendarDateTime::Utc(dt) => CalendarTime::DateTimeUtc(dt),
            icalendar::CalendarDateTime::Floating(naive) => CalendarTime::DateTimeFloating(naive),
            icalendar::CalendarDateTime::WithTimezone { date_time, tzid } => {
                CalendarTime::DateTimeZoned {
                    datetime: date_time,
                    tzid,
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionKind;
    use chrono::NaiveDate;

    fn errands() -> Collection {
        Collection {
            id: "errands".into(),
            title: "Errands".into(),
            kind: CollectionKind::Reminders,
            writable: true,
        }
    }

    #[test]
    fn parse_todo_reads_due_and_priority() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VTODO\r\n\
UID:todo-1\r\n\
SUMMARY:Buy milk\r\n\
DUE:20240101T090000\r\n\
PRIORITY:5\r\n\
END:VTODO\r\n\
END:VCALENDAR";

        let reminder = parse_todo(ics, &errands()).expect("Should parse");

        assert_eq!(reminder.id, "todo-1");
        assert_eq!(reminder.title.as_deref(), Some("Buy milk"));
        assert_eq!(reminder.priority, Some(5));
        assert!(!reminder.completed);
        assert_eq!(
            reminder.due,
            Some(CalendarTime::DateTimeFloating(
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap()
            ))
        );
    }

    #[test]
    fn parse_todo_without_due_is_anytime() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VTODO\r\n\
UID:todo-2\r\n\
SUMMARY:Someday\r\n\
STATUS:COMPLETED\r\n\
END:VTODO\r\n\
END:VCALENDAR";

        let reminder = parse_todo(ics, &errands()).expect("Should parse");
        assert!(reminder.is_anytime());
        assert!(reminder.completed);
    }

    #[test]
    fn parse_event_defaults_missing_status_and_end() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:ev-1\r\n\
SUMMARY:Standup\r\n\
DTSTART:20240320T150000Z\r\n\
LOCATION:Room 1\\nBuilding B\r\n\
END:VEVENT\r\n\
END:VCALENDAR";

        let event = parse_event(ics, &errands()).expect("Should parse");

        assert_eq!(event.status, EventStatus::None);
        assert!(!event.all_day);
        assert_eq!(event.location.as_deref(), Some("Room 1\nBuilding B"));
        assert_eq!(event.end, event.start.add(Duration::hours(1)));
    }
}

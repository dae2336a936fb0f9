//! Calendar events.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::time::CalendarTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// No status recorded
    None,
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventStatus {
    /// Events without an explicit status count as confirmed.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, EventStatus::None | EventStatus::Confirmed)
    }
}

/// A calendar event (VEVENT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: Option<String>,
    pub start: CalendarTime,
    pub end: CalendarTime,
    pub all_day: bool,
    /// Title of the structured location
    pub location: Option<String>,
    pub notes: Option<String>,
    pub url: Option<String>,
    pub status: EventStatus,
    pub collection: Collection,
}

impl Event {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("?")
    }
}

/// Input for creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub start: CalendarTime,
    pub end: Option<CalendarTime>,
    pub location: Option<String>,
}

impl NewEvent {
    /// Build the event to persist on `collection`.
    ///
    /// Without an explicit end, timed events last one hour and date-only
    /// events become all-day events ending the following day.
    pub fn into_event(self, collection: Collection) -> Event {
        let all_day = self.start.is_date_only();
        let end = self.end.unwrap_or_else(|| {
            if all_day {
                self.start.add(Duration::days(1))
            } else {
                self.start.add(Duration::hours(1))
            }
        });

        Event {
            id: uuid::Uuid::new_v4().to_string(),
            title: Some(self.title),
            start: self.start,
            end,
            all_day,
            location: self.location,
            notes: None,
            url: None,
            status: EventStatus::None,
            collection,
        }
    }
}

//! Reminder items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::time::CalendarTime;

/// A reminder (VTODO). No due date makes it an "anytime" reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub title: Option<String>,
    pub due: Option<CalendarTime>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// iCalendar priority, 0 (undefined) through 9 (lowest)
    pub priority: Option<u8>,
    pub notes: Option<String>,
    pub url: Option<String>,
    pub location: Option<String>,
    pub collection: Collection,
}

impl Reminder {
    pub fn is_anytime(&self) -> bool {
        self.due.is_none()
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.completed_at = Some(Utc::now());
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("?")
    }
}

/// Input for creating a reminder.
#[derive(Debug, Clone, Default)]
pub struct NewReminder {
    pub title: String,
    pub due: Option<CalendarTime>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<u8>,
    pub location: Option<String>,
}

impl NewReminder {
    pub fn new(title: impl Into<String>) -> Self {
        NewReminder {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Build the reminder to persist on `collection`, with a fresh identifier.
    pub fn into_reminder(self, collection: Collection) -> Reminder {
        Reminder {
            id: uuid::Uuid::new_v4().to_string(),
            title: Some(self.title),
            due: self.due,
            completed: false,
            completed_at: None,
            priority: self.priority,
            notes: self.notes,
            url: self.url,
            location: self.location,
            collection,
        }
    }
}

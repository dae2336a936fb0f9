//! Reminder lists and calendars.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of items a collection holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Reminders,
    Events,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CollectionKind::Reminders => write!(f, "reminders"),
            CollectionKind::Events => write!(f, "events"),
        }
    }
}

/// A reminder list or calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Store-stable identifier
    pub id: String,
    /// Display name, matched case-insensitively
    pub title: String,
    pub kind: CollectionKind,
    pub writable: bool,
}

impl Collection {
    pub fn matches_title(&self, name: &str) -> bool {
        self.title.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

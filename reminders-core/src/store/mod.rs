//! Store capability interface.
//!
//! The reminders and calendar data live in an external store. Everything
//! the engine needs from it is expressed by the blocking [`Store`] trait;
//! adapters that talk to asynchronous backends convert each request into
//! a single call that blocks until its one result arrives.

pub mod local;
#[cfg(test)]
pub(crate) mod memory;
pub mod protocol;
pub mod provider;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::collection::{Collection, CollectionKind};
use crate::error::RemindersResult;
use crate::event::Event;
use crate::reminder::Reminder;

pub use local::LocalStore;
pub use provider::ProviderStore;

/// Selects incomplete reminders by collection and due date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderPredicate {
    /// Inclusive upper bound on the due instant; `None` means unbounded
    pub due_before: Option<DateTime<Local>>,
    /// Collection ids to search. Empty matches nothing.
    pub collections: Vec<String>,
}

impl ReminderPredicate {
    /// With an upper bound, reminders without a due date never match. A due
    /// value that cannot be resolved is let through for the caller to order.
    pub fn matches(&self, reminder: &Reminder) -> bool {
        if reminder.completed || !self.collections.contains(&reminder.collection.id) {
            return false;
        }

        match (&self.due_before, &reminder.due) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(bound), Some(due)) => due.resolve().is_none_or(|at| at <= *bound),
        }
    }
}

/// Selects events overlapping `[start, end]` in the given collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPredicate {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    /// Collection ids to search. Empty matches nothing.
    pub collections: Vec<String>,
}

impl EventPredicate {
    pub fn matches(&self, event: &Event) -> bool {
        if !self.collections.contains(&event.collection.id) {
            return false;
        }

        match (event.start.resolve(), event.end.resolve()) {
            (Some(start), Some(end)) => start <= self.end && end >= self.start,
            (Some(start), None) => start >= self.start && start <= self.end,
            _ => false,
        }
    }
}

/// Capability interface onto the external reminders/calendar store.
pub trait Store {
    /// Ask for access to one domain. `Ok(false)` means the user declined.
    fn request_access(&self, kind: CollectionKind) -> RemindersResult<bool>;

    /// All collections of a kind, writable or not, in store order.
    fn collections(&self, kind: CollectionKind) -> RemindersResult<Vec<Collection>>;

    fn query_reminders(&self, predicate: &ReminderPredicate) -> RemindersResult<Vec<Reminder>>;

    fn query_events(&self, predicate: &EventPredicate) -> RemindersResult<Vec<Event>>;

    /// Look up a reminder by its stable identifier.
    fn lookup_reminder(&self, id: &str) -> RemindersResult<Option<Reminder>>;

    /// Create or update a reminder.
    fn save_reminder(&self, reminder: &Reminder) -> RemindersResult<()>;

    /// Create or update an event.
    fn save_event(&self, event: &Event) -> RemindersResult<()>;
}

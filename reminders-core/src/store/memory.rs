//! In-memory store for engine and command tests.

use std::cell::{Cell, RefCell};

use crate::collection::{Collection, CollectionKind};
use crate::error::{RemindersError, RemindersResult};
use crate::event::Event;
use crate::reminder::Reminder;
use crate::store::{EventPredicate, ReminderPredicate, Store};

#[derive(Default)]
pub(crate) struct MemoryStore {
    pub collections: Vec<Collection>,
    pub reminders: RefCell<Vec<Reminder>>,
    pub events: RefCell<Vec<Event>>,
    pub granted: bool,
    pub fail_saves: bool,
    access_requests: Cell<usize>,
    reads: Cell<usize>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new(collections: Vec<Collection>) -> Self {
        MemoryStore {
            collections,
            granted: true,
            ..Default::default()
        }
    }

    pub fn with_reminders(self, reminders: Vec<Reminder>) -> Self {
        self.reminders.replace(reminders);
        self
    }

    pub fn with_events(self, events: Vec<Event>) -> Self {
        self.events.replace(events);
        self
    }

    pub fn access_requests(&self) -> usize {
        self.access_requests.get()
    }

    /// Number of collection, query and lookup calls that reached the store.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    fn record_read(&self) {
        self.reads.set(self.reads.get() + 1);
    }

    /// Number of save calls that reached the store.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    fn record_save(&self, item: &'static str) -> RemindersResult<()> {
        self.saves.set(self.saves.get() + 1);
        if self.fail_saves {
            return Err(RemindersError::Persistence {
                item,
                message: "store is locked".into(),
            });
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn request_access(&self, _kind: CollectionKind) -> RemindersResult<bool> {
        self.access_requests.set(self.access_requests.get() + 1);
        Ok(self.granted)
    }

    fn collections(&self, kind: CollectionKind) -> RemindersResult<Vec<Collection>> {
        self.record_read();
        Ok(self
            .collections
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect())
    }

    fn query_reminders(&self, predicate: &ReminderPredicate) -> RemindersResult<Vec<Reminder>> {
        self.record_read();
        Ok(self
            .reminders
            .borrow()
            .iter()
            .filter(|r| predicate.matches(r))
            .cloned()
            .collect())
    }

    fn query_events(&self, predicate: &EventPredicate) -> RemindersResult<Vec<Event>> {
        self.record_read();
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| predicate.matches(e))
            .cloned()
            .collect())
    }

    fn lookup_reminder(&self, id: &str) -> RemindersResult<Option<Reminder>> {
        self.record_read();
        Ok(self.reminders.borrow().iter().find(|r| r.id == id).cloned())
    }

    fn save_reminder(&self, reminder: &Reminder) -> RemindersResult<()> {
        self.record_save("reminder")?;
        let mut reminders = self.reminders.borrow_mut();
        match reminders.iter_mut().find(|r| r.id == reminder.id) {
            Some(existing) => *existing = reminder.clone(),
            None => reminders.push(reminder.clone()),
        }
        Ok(())
    }

    fn save_event(&self, event: &Event) -> RemindersResult<()> {
        self.record_save("event")?;
        let mut events = self.events.borrow_mut();
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event.clone(),
            None => events.push(event.clone()),
        }
        Ok(())
    }
}

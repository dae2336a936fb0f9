//! Retrieval and filtering of reminders and events.
//!
//! Every function takes the store explicitly. Results come back in a
//! deterministic order so that the position of an item in one listing can
//! be used to address it in a following `complete` call, as long as the
//! underlying lists did not change in between.

use chrono::{DateTime, Duration, Local};
use tracing::debug;

use crate::collection::{Collection, CollectionKind};
use crate::config::global_config::DEFAULT_HORIZON_DAYS;
use crate::error::{RemindersError, RemindersResult};
use crate::event::{Event, NewEvent};
use crate::reminder::{NewReminder, Reminder};
use crate::store::{EventPredicate, ReminderPredicate, Store};

/// Which collections a reminder query spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    One(Collection),
    /// Every writable reminder list
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderMode {
    /// Reminders with a due date, up to the horizon, soonest first
    Dated,
    /// Reminders without a due date, in store order
    Anytime,
}

/// Ask for both domains; stops at the first refusal.
pub fn require_access(store: &dyn Store) -> RemindersResult<()> {
    for kind in [CollectionKind::Reminders, CollectionKind::Events] {
        if !store.request_access(kind)? {
            return Err(RemindersError::PermissionDenied);
        }
    }
    Ok(())
}

/// Writable collections of a kind, in store order.
pub fn list_collections(
    store: &dyn Store,
    kind: CollectionKind,
) -> RemindersResult<Vec<Collection>> {
    Ok(store
        .collections(kind)?
        .into_iter()
        .filter(|c| c.writable)
        .collect())
}

/// Find a writable collection by title, ignoring case.
pub fn resolve_collection(
    store: &dyn Store,
    name: &str,
    kind: CollectionKind,
) -> RemindersResult<Collection> {
    list_collections(store, kind)?
        .into_iter()
        .find(|c| c.matches_title(name))
        .ok_or_else(|| RemindersError::CollectionNotFound(name.to_string()))
}

fn horizon_end(
    now: DateTime<Local>,
    horizon_days: Option<u32>,
) -> RemindersResult<DateTime<Local>> {
    let days = horizon_days.unwrap_or(DEFAULT_HORIZON_DAYS);

    Duration::try_days(i64::from(days))
        .and_then(|span| now.checked_add_signed(span))
        .ok_or(RemindersError::HorizonOutOfRange(days))
}

fn scope_ids(store: &dyn Store, scope: &Scope) -> RemindersResult<Vec<String>> {
    match scope {
        Scope::One(collection) => Ok(vec![collection.id.clone()]),
        Scope::All => Ok(list_collections(store, CollectionKind::Reminders)?
            .into_iter()
            .map(|c| c.id)
            .collect()),
    }
}

/// Incomplete reminders in `scope`.
///
/// In dated mode only reminders due within `horizon_days` (default 5) are
/// returned, sorted ascending by due instant. A due value that does not
/// resolve to an instant sorts as the current time. Anytime mode ignores
/// the horizon.
pub fn fetch_reminders(
    store: &dyn Store,
    scope: &Scope,
    horizon_days: Option<u32>,
    mode: ReminderMode,
) -> RemindersResult<Vec<Reminder>> {
    fetch_reminders_at(store, scope, horizon_days, mode, Local::now())
}

fn fetch_reminders_at(
    store: &dyn Store,
    scope: &Scope,
    horizon_days: Option<u32>,
    mode: ReminderMode,
    now: DateTime<Local>,
) -> RemindersResult<Vec<Reminder>> {
    let collections = scope_ids(store, scope)?;

    match mode {
        ReminderMode::Anytime => {
            let predicate = ReminderPredicate {
                due_before: None,
                collections,
            };
            let reminders = store.query_reminders(&predicate)?;

            Ok(reminders
                .into_iter()
                .filter(|r| !r.completed && r.is_anytime())
                .collect())
        }
        ReminderMode::Dated => {
            let bound = horizon_end(now, horizon_days)?;
            let predicate = ReminderPredicate {
                due_before: Some(bound),
                collections,
            };
            let mut reminders: Vec<Reminder> = store
                .query_reminders(&predicate)?
                .into_iter()
                .filter(|r| !r.completed)
                .filter(|r| match &r.due {
                    Some(due) => due.resolve().is_none_or(|at| at <= bound),
                    None => false,
                })
                .collect();

            reminders.sort_by_key(|r| due_or(r, now));
            debug!(count = reminders.len(), %bound, "fetched dated reminders");

            Ok(reminders)
        }
    }
}

/// Due instant of a reminder, or `fallback` when it has none or it does not resolve.
pub fn due_or(reminder: &Reminder, fallback: DateTime<Local>) -> DateTime<Local> {
    reminder
        .due
        .as_ref()
        .and_then(|d| d.resolve())
        .unwrap_or(fallback)
}

/// Events overlapping the next `horizon_days` (default 5), in store order.
///
/// Without a calendar every writable calendar is searched.
pub fn fetch_events(
    store: &dyn Store,
    calendar: Option<&Collection>,
    horizon_days: Option<u32>,
) -> RemindersResult<Vec<Event>> {
    fetch_events_at(store, calendar, horizon_days, Local::now())
}

fn fetch_events_at(
    store: &dyn Store,
    calendar: Option<&Collection>,
    horizon_days: Option<u32>,
    now: DateTime<Local>,
) -> RemindersResult<Vec<Event>> {
    let collections = match calendar {
        Some(c) => vec![c.id.clone()],
        None => list_collections(store, CollectionKind::Events)?
            .into_iter()
            .map(|c| c.id)
            .collect(),
    };

    let predicate = EventPredicate {
        start: now,
        end: horizon_end(now, horizon_days)?,
        collections,
    };

    store.query_events(&predicate)
}

/// Take the item at a zero-based position in a result set.
pub fn item_at<T>(items: Vec<T>, index: i64, list: Option<&str>) -> RemindersResult<T> {
    usize::try_from(index)
        .ok()
        .and_then(|i| items.into_iter().nth(i))
        .ok_or_else(|| RemindersError::IndexOutOfRange {
            index,
            list: list.map(str::to_string),
        })
}

/// Complete the reminder shown at `index` by the matching listing.
pub fn complete_at(
    store: &dyn Store,
    scope: &Scope,
    mode: ReminderMode,
    horizon_days: Option<u32>,
    index: i64,
) -> RemindersResult<Reminder> {
    let reminders = fetch_reminders(store, scope, horizon_days, mode)?;

    let list = match (scope, mode) {
        (Scope::One(collection), ReminderMode::Dated) => Some(collection.title.as_str()),
        _ => None,
    };

    complete(store, item_at(reminders, index, list)?)
}

/// Complete a reminder by its stable identifier.
pub fn complete_by_id(store: &dyn Store, id: &str) -> RemindersResult<Reminder> {
    let reminder = store
        .lookup_reminder(id)?
        .ok_or_else(|| RemindersError::ItemNotFound(id.to_string()))?;

    complete(store, reminder)
}

fn complete(store: &dyn Store, mut reminder: Reminder) -> RemindersResult<Reminder> {
    reminder.mark_completed();
    store.save_reminder(&reminder)?;
    debug!(id = %reminder.id, "completed reminder");

    Ok(reminder)
}

/// Create a reminder on the writable list named `list_name`.
pub fn add_reminder(
    store: &dyn Store,
    list_name: &str,
    new: NewReminder,
) -> RemindersResult<Reminder> {
    let collection = resolve_collection(store, list_name, CollectionKind::Reminders)?;
    let reminder = new.into_reminder(collection);
    store.save_reminder(&reminder)?;

    Ok(reminder)
}

/// Create an event on the writable calendar named `calendar_name`.
pub fn add_event(store: &dyn Store, calendar_name: &str, new: NewEvent) -> RemindersResult<Event> {
    let collection = resolve_collection(store, calendar_name, CollectionKind::Events)?;
    let event = new.into_event(collection);
    store.save_event(&event)?;

    Ok(event)
}

//! Core library for the reminders CLI.
//!
//! - `store`: the capability interface onto the reminders/calendar store,
//!   with a local ICS directory adapter and an external provider adapter
//! - `query`: retrieval, filtering and ordering of reminders and events
//! - `format`: newline-delimited JSON records for listings
//! - `config`: global and per-collection configuration

pub mod collection;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod ics;
pub mod meeting;
pub mod query;
pub mod reminder;
pub mod store;
pub mod time;

pub use collection::{Collection, CollectionKind};
pub use error::{RemindersError, RemindersResult};
pub use event::{Event, EventStatus, NewEvent};
pub use query::{ReminderMode, Scope};
pub use reminder::{NewReminder, Reminder};
pub use store::Store;
pub use time::CalendarTime;

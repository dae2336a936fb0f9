//! Defines the JSON protocol used for communication between the reminders
//! CLI and provider binaries over stdin/stdout.
//!
//! One request line goes to the provider's stdin; the provider writes one
//! response object to stdout and exits.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::collection::{Collection, CollectionKind};
use crate::event::Event;
use crate::reminder::Reminder;
use crate::store::{EventPredicate, ReminderPredicate};

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    RequestAccess,
    ListCollections,
    QueryReminders,
    QueryEvents,
    LookupReminder,
    SaveReminder,
    SaveEvent,
}

/// Request sent from CLI to provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from provider to CLI.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

/// Ask the provider for access to one domain (it may prompt the user).
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestAccess {
    pub kind: CollectionKind,
}

impl ProviderCommand for RequestAccess {
    type Response = bool;
    fn command() -> Command {
        Command::RequestAccess
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListCollections {
    pub kind: CollectionKind,
}

impl ProviderCommand for ListCollections {
    type Response = Vec<Collection>;
    fn command() -> Command {
        Command::ListCollections
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryReminders {
    #[serde(flatten)]
    pub predicate: ReminderPredicate,
}

impl ProviderCommand for QueryReminders {
    type Response = Vec<Reminder>;
    fn command() -> Command {
        Command::QueryReminders
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryEvents {
    #[serde(flatten)]
    pub predicate: EventPredicate,
}

impl ProviderCommand for QueryEvents {
    type Response = Vec<Event>;
    fn command() -> Command {
        Command::QueryEvents
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupReminder {
    pub id: String,
}

impl ProviderCommand for LookupReminder {
    type Response = Option<Reminder>;
    fn command() -> Command {
        Command::LookupReminder
    }
}

/// Create or update a reminder.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveReminder {
    pub reminder: Reminder,
}

impl ProviderCommand for SaveReminder {
    type Response = ();
    fn command() -> Command {
        Command::SaveReminder
    }
}

/// Create or update an event.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveEvent {
    pub event: Event,
}

impl ProviderCommand for SaveEvent {
    type Response = ();
    fn command() -> Command {
        Command::SaveEvent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_command_in_snake_case() {
        let params = serde_json::to_value(LookupReminder { id: "abc".into() }).unwrap();
        let request = Request {
            command: LookupReminder::command(),
            params,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"command":"lookup_reminder","params":{"id":"abc"}}"#);
    }

    #[test]
    fn response_is_tagged_by_status() {
        let ok: Response<bool> =
            serde_json::from_str(r#"{"status":"success","data":true}"#).unwrap();
        assert!(matches!(ok, Response::Success { data: true }));

        let err: Response<bool> =
            serde_json::from_str(r#"{"status":"error","error":"denied"}"#).unwrap();
        assert!(matches!(err, Response::Error { error } if error == "denied"));
    }
}

//! Provider subprocess store.
//!
//! Delegates every capability to an external executable
//! (`reminders-provider-<name>`, e.g. a bridge to the platform's reminders
//! database) using the JSON protocol in [`crate::store::protocol`].
//!
//! Each call spawns the provider, writes one request and waits for its one
//! response. The future is driven to completion on a current-thread
//! runtime owned by the store, so callers see an ordinary blocking call.
//! There is no timeout and no cancellation.

use std::path::PathBuf;
use std::process::Stdio;

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::collection::{Collection, CollectionKind};
use crate::error::{RemindersError, RemindersResult};
use crate::event::Event;
use crate::reminder::Reminder;
use crate::store::protocol::{
    Command, ListCollections, LookupReminder, ProviderCommand, QueryEvents, QueryReminders,
    Request, RequestAccess, Response, SaveEvent, SaveReminder,
};
use crate::store::{EventPredicate, ReminderPredicate, Store};

pub struct ProviderStore {
    name: String,
    binary: PathBuf,
    runtime: Runtime,
}

impl ProviderStore {
    /// Find `reminders-provider-<name>` on PATH.
    pub fn new(name: &str) -> RemindersResult<Self> {
        let binary_name = format!("reminders-provider-{}", name);
        let binary = which::which(&binary_name).map_err(|_| {
            RemindersError::ProviderNotInstalled(format!(
                "Provider '{}' not found. Install {} somewhere on your PATH",
                name, binary_name
            ))
        })?;

        Self::with_binary(name, binary)
    }

    /// Use an explicit provider executable.
    pub fn with_binary(name: &str, binary: impl Into<PathBuf>) -> RemindersResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(ProviderStore {
            name: name.to_string(),
            binary: binary.into(),
            runtime,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call a typed provider command and block until it answers.
    pub fn call<C: ProviderCommand>(&self, cmd: C) -> RemindersResult<C::Response> {
        self.runtime.block_on(self.call_raw(C::command(), cmd))
    }

    /// Low-level call that sends a command with params and deserializes the response.
    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> RemindersResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| RemindersError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| RemindersError::Serialization(e.to_string()))?;

        debug!(provider = %self.name, ?command, "calling provider");

        let mut child = TokioCommand::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                let binary = self.binary.display();
                RemindersError::Provider(format!("Failed to spawn {binary}: {e}"))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RemindersError::Provider("Provider stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(RemindersError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(RemindersError::Provider("Provider returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| RemindersError::Provider(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(RemindersError::Provider(error)),
        }
    }
}

/// Provider-reported failures on save are persistence failures.
fn as_persistence(item: &'static str) -> impl Fn(RemindersError) -> RemindersError {
    move |err| match err {
        RemindersError::Provider(message) => RemindersError::Persistence { item, message },
        other => other,
    }
}

impl Store for ProviderStore {
    fn request_access(&self, kind: CollectionKind) -> RemindersResult<bool> {
        self.call(RequestAccess { kind })
    }

    fn collections(&self, kind: CollectionKind) -> RemindersResult<Vec<Collection>> {
        self.call(ListCollections { kind })
    }

    fn query_reminders(&self, predicate: &ReminderPredicate) -> RemindersResult<Vec<Reminder>> {
        self.call(QueryReminders {
            predicate: predicate.clone(),
        })
    }

    fn query_events(&self, predicate: &EventPredicate) -> RemindersResult<Vec<Event>> {
        self.call(QueryEvents {
            predicate: predicate.clone(),
        })
    }

    fn lookup_reminder(&self, id: &str) -> RemindersResult<Option<Reminder>> {
        self.call(LookupReminder { id: id.to_string() })
    }

    fn save_reminder(&self, reminder: &Reminder) -> RemindersResult<()> {
        self.call(SaveReminder {
            reminder: reminder.clone(),
        })
        .map_err(as_persistence("reminder"))
    }

    fn save_event(&self, event: &Event) -> RemindersResult<()> {
        self.call(SaveEvent {
            event: event.clone(),
        })
        .map_err(as_persistence("event"))
    }
}

//! Error types for reminders operations.

use thiserror::Error;

/// Errors that can occur while talking to a store or resolving items.
///
/// Every variant is terminal for the invocation that produced it; the
/// CLI prints the message and exits with status 1.
#[derive(Error, Debug)]
pub enum RemindersError {
    #[error("You need to grant reminders access")]
    PermissionDenied,

    #[error("No reminders list matching {0}")]
    CollectionNotFound(String),

    #[error("No reminder at index {index}{}", on_list(.list))]
    IndexOutOfRange { index: i64, list: Option<String> },

    #[error("No reminder found matching '{0}'")]
    ItemNotFound(String),

    #[error("Failed to save {item} with error: {message}")]
    Persistence {
        item: &'static str,
        message: String,
    },

    #[error("Cannot look {0} days ahead")]
    HorizonOutOfRange(u32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected yyyy-MM-dd HH:mm")]
    InvalidDate(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("{0}")]
    ProviderNotInstalled(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RemindersError {
    pub fn reminder_save(err: impl std::fmt::Display) -> Self {
        RemindersError::Persistence {
            item: "reminder",
            message: err.to_string(),
        }
    }

    pub fn event_save(err: impl std::fmt::Display) -> Self {
        RemindersError::Persistence {
            item: "event",
            message: err.to_string(),
        }
    }
}

fn on_list(list: &Option<String>) -> String {
    list.as_ref().map(|l| format!(" on {l}")).unwrap_or_default()
}

/// Result type alias for reminders operations.
pub type RemindersResult<T> = Result<T, RemindersError>;

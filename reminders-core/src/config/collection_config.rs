//! Per-collection configuration for the local store.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collection::CollectionKind;
use crate::error::{RemindersError, RemindersResult};

/// Marker directory inside each collection directory.
pub const META_DIR: &str = ".reminders";

/// Configuration stored in each collection's .reminders/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CollectionConfig {
    /// Display name; defaults to the directory name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default = "default_kind")]
    pub kind: CollectionKind,

    #[serde(default)]
    pub read_only: bool,
}

fn default_kind() -> CollectionKind {
    CollectionKind::Reminders
}

impl CollectionConfig {
    pub fn path(collection_dir: &Path) -> std::path::PathBuf {
        collection_dir.join(META_DIR).join("config.toml")
    }

    pub fn exists(collection_dir: &Path) -> bool {
        Self::path(collection_dir).exists()
    }

    /// Load config from .reminders/config.toml
    pub fn load(collection_dir: &Path) -> RemindersResult<Self> {
        let content = std::fs::read_to_string(Self::path(collection_dir))?;
        toml::from_str(&content).map_err(|e| RemindersError::Config(e.to_string()))
    }

    /// Save config to .reminders/config.toml
    pub fn save(&self, collection_dir: &Path) -> RemindersResult<()> {
        std::fs::create_dir_all(collection_dir.join(META_DIR))?;

        let content =
            toml::to_string_pretty(self).map_err(|e| RemindersError::Config(e.to_string()))?;
        std::fs::write(Self::path(collection_dir), content)?;

        Ok(())
    }
}

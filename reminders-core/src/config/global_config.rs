//! Global reminders configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{RemindersError, RemindersResult};

static DEFAULT_DATA_DIR: &str = "~/reminders";

/// Days ahead that reminder and event queries cover by default.
pub const DEFAULT_HORIZON_DAYS: u32 = 5;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

/// Global configuration at ~/.config/reminders/config.toml
///
/// Every key can be overridden with a `REMINDERS_`-prefixed environment
/// variable (e.g. `REMINDERS_DATA_DIR`).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GlobalConfig {
    /// Root of the local ICS store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of an external provider (`reminders-provider-<name>`) to use
    /// instead of the local store
    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            data_dir: default_data_dir(),
            provider: None,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> RemindersResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RemindersError::Config("Could not determine config directory".into()))?
            .join("reminders");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first
    /// if no config file exists yet.
    pub fn load() -> RemindersResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> RemindersResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("REMINDERS").try_parsing(true))
            .build()
            .map_err(|e| RemindersError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RemindersError::Config(e.to_string()))
    }

    /// Local store root with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RemindersResult<()> {
        let contents = format!(
            "\
# reminders configuration

# Where the local store keeps its lists and calendars:
# data_dir = \"{}\"

# Use an external store provider (reminders-provider-<name>) instead:
# provider = \"eventkit\"

# Days ahead covered by upcoming/show/events:
# horizon_days = {}
",
            DEFAULT_DATA_DIR, DEFAULT_HORIZON_DAYS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RemindersError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RemindersError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

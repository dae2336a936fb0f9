//! Configuration types for reminders.

pub mod collection_config;
pub mod global_config;

pub use collection_config::CollectionConfig;
pub use global_config::GlobalConfig;

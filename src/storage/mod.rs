//! Storage module for local preferences and configuration.

pub mod config;
pub mod local;

pub use config::{AppConfig, ConfigError, MailSettings, ServerSettings};
pub use local::{FileStore, KeyValueStore, MemoryStore, StorageError};

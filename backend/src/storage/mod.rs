//! # Storage Module
//!
//! Handles all data persistence for Lansia Helper.
//!
//! Everything the app owns lives in one local key/value store. Collections
//! of records (schedules, health logs, contacts) are kept as a JSON array
//! under a single key each; settings are one JSON object under their own
//! key.
//!
//! ## Storage keys
//!
//! - `medicineSchedules`: medicine schedules
//! - `appSettings`: language and theme
//! - `vitalSigns`, `symptomLogs`: health self-tracking logs
//! - `contacts`: family and doctor shortcuts
//!
//! ## Write safety
//!
//! The store only guarantees per-key atomicity, so every collection
//! serializes its own read-modify-write cycles behind an async mutex. Two
//! saves issued back to back both land instead of the second overwriting
//! the first.

pub mod db;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use db::DbConnection;
pub use memory::MemoryStore;
pub use repositories::{
    CollectionRecord, ContactRepository, HealthRepository, JsonCollection, ScheduleRepository,
    SettingsRepository,
};
pub use traits::KeyValueStore;

/// Errors raised while reading or writing persisted records
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Store access failed: {0}")]
    Store(#[from] anyhow::Error),
    #[error("Data stored under '{key}' could not be read: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
    #[error("Failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("A record with id '{0}' already exists")]
    DuplicateId(String),
}

//! # Storage Traits
//!
//! This module defines the storage abstraction the repositories are written
//! against. The on-device store is a plain string key/value capability: each
//! key is read and written atomically, and there are no transactions that
//! span more than one key.

use anyhow::Result;
use async_trait::async_trait;

/// Trait defining the interface for local key/value storage
///
/// This trait abstracts away the specific storage implementation details,
/// allowing repositories to run against SQLite on device or an in-memory
/// map in tests without modification.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Retrieve the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any existing value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`
    /// Returns true if a value was found and deleted, false otherwise
    async fn delete(&self, key: &str) -> Result<bool>;

    /// List all keys in alphabetical order
    async fn list_keys(&self) -> Result<Vec<String>>;
}

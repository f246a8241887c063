//! # JSON Collection
//!
//! Many records persisted under one store key as a JSON array.
//!
//! ```json
//! medicineSchedules = [
//!   { "id": "schedule::1704067200000::1a2b3c4d", "medicineName": "Paracetamol", ... },
//!   { "id": "schedule::1704153600000::9f8e7d6c", "medicineName": "Amlodipine", ... }
//! ]
//! ```
//!
//! Every mutation reads the whole array, changes it and writes it back.
//! Clones of a collection share one async mutex held across that cycle, so
//! concurrent mutations run one after another and none is lost. Build one
//! collection per key and clone it; two independently constructed
//! collections over the same key do not share the lock.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

/// A record that can live in a [`JsonCollection`]
pub trait CollectionRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn record_id(&self) -> &str;
}

pub struct JsonCollection<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    write_lock: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

// Manual impl: cloning must not require `T: Clone` bounds on the handle itself
impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            write_lock: Arc::clone(&self.write_lock),
            _record: PhantomData,
        }
    }
}

impl<T: CollectionRecord> JsonCollection<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            write_lock: Arc::new(Mutex::new(())),
            _record: PhantomData,
        }
    }

    /// Read every record. A missing key is an empty collection; content
    /// that does not parse is reported as [`StorageError::Corrupt`].
    pub async fn load(&self) -> Result<Vec<T>, StorageError> {
        let raw = match self.store.get(self.key).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        serde_json::from_str(&raw).map_err(|source| {
            warn!("Stored data under '{}' is unreadable: {}", self.key, source);
            StorageError::Corrupt {
                key: self.key.to_string(),
                source,
            }
        })
    }

    async fn save(&self, records: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(records).map_err(StorageError::Encode)?;
        self.store.set(self.key, &json).await?;
        debug!("Saved {} records under '{}'", records.len(), self.key);
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, StorageError> {
        Ok(self.load().await?.into_iter().find(|r| r.record_id() == id))
    }

    /// Append a record. Fails with [`StorageError::DuplicateId`] if the id is taken.
    pub async fn insert(&self, record: T) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        if records.iter().any(|r| r.record_id() == record.record_id()) {
            return Err(StorageError::DuplicateId(record.record_id().to_string()));
        }

        records.push(record);
        self.save(&records).await
    }

    /// Replace the record with the same id.
    /// Returns false, without writing, if no record matches.
    pub async fn replace(&self, record: T) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        match records.iter_mut().find(|r| r.record_id() == record.record_id()) {
            Some(existing) => *existing = record,
            None => return Ok(false),
        }

        self.save(&records).await?;
        Ok(true)
    }

    /// Remove the record with `id`, returning it.
    /// Returns None, without writing, if no record matches.
    pub async fn remove(&self, id: &str) -> Result<Option<T>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let position = match records.iter().position(|r| r.record_id() == id) {
            Some(position) => position,
            None => return Ok(None),
        };

        let removed = records.remove(position);
        self.save(&records).await?;
        Ok(Some(removed))
    }

    /// Drop the whole collection, including unreadable content
    pub async fn clear(&self) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.store.delete(self.key).await?)
    }
}

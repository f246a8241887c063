//! # Schedule Repository
//!
//! Owns the `medicineSchedules` key: a JSON array of every medicine
//! schedule, keyed by schedule id.

use std::sync::Arc;
use tracing::info;

use super::json_collection::{CollectionRecord, JsonCollection};
use crate::domain::models::schedule::MedicineSchedule;
use crate::storage::{KeyValueStore, StorageError};

pub const SCHEDULES_KEY: &str = "medicineSchedules";

impl CollectionRecord for MedicineSchedule {
    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct ScheduleRepository {
    collection: JsonCollection<MedicineSchedule>,
}

impl ScheduleRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            collection: JsonCollection::new(store, SCHEDULES_KEY),
        }
    }

    /// All schedules in insertion order
    pub async fn list(&self) -> Result<Vec<MedicineSchedule>, StorageError> {
        self.collection.load().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<MedicineSchedule>, StorageError> {
        self.collection.get(id).await
    }

    pub async fn create(&self, schedule: &MedicineSchedule) -> Result<(), StorageError> {
        info!("Storing schedule {} ({})", schedule.id, schedule.medicine_name);
        self.collection.insert(schedule.clone()).await
    }

    /// Replace the stored schedule with the same id.
    /// Returns false if there is no such schedule; nothing is written then.
    pub async fn update(&self, schedule: &MedicineSchedule) -> Result<bool, StorageError> {
        self.collection.replace(schedule.clone()).await
    }

    /// Returns false if there is no such schedule; the list is left unchanged.
    pub async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.collection.remove(id).await?.is_some())
    }

    /// Remove every schedule, including unreadable data
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.collection.clear().await?;
        Ok(())
    }
}

//! # Health Repository
//!
//! Self-tracking logs: vital signs under `vitalSigns` and symptoms under
//! `symptomLogs`, each a JSON array.

use std::sync::Arc;

use super::json_collection::{CollectionRecord, JsonCollection};
use crate::domain::models::health::{SymptomEntry, VitalSignsEntry};
use crate::storage::{KeyValueStore, StorageError};

pub const VITAL_SIGNS_KEY: &str = "vitalSigns";
pub const SYMPTOMS_KEY: &str = "symptomLogs";

impl CollectionRecord for VitalSignsEntry {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl CollectionRecord for SymptomEntry {
    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
pub struct HealthRepository {
    vitals: JsonCollection<VitalSignsEntry>,
    symptoms: JsonCollection<SymptomEntry>,
}

impl HealthRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            vitals: JsonCollection::new(Arc::clone(&store), VITAL_SIGNS_KEY),
            symptoms: JsonCollection::new(store, SYMPTOMS_KEY),
        }
    }

    pub async fn store_vitals(&self, entry: &VitalSignsEntry) -> Result<(), StorageError> {
        self.vitals.insert(entry.clone()).await
    }

    /// Vital signs, most recent first
    pub async fn list_vitals(&self) -> Result<Vec<VitalSignsEntry>, StorageError> {
        let mut entries = self.vitals.load().await?;
        entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(entries)
    }

    pub async fn delete_vitals(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.vitals.remove(id).await?.is_some())
    }

    pub async fn store_symptom(&self, entry: &SymptomEntry) -> Result<(), StorageError> {
        self.symptoms.insert(entry.clone()).await
    }

    /// Symptoms, most recent first
    pub async fn list_symptoms(&self) -> Result<Vec<SymptomEntry>, StorageError> {
        let mut entries = self.symptoms.load().await?;
        entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(entries)
    }

    pub async fn delete_symptom(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.symptoms.remove(id).await?.is_some())
    }
}

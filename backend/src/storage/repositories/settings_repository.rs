//! # Settings Repository
//!
//! A single JSON object under `appSettings`.

use std::sync::Arc;
use tracing::debug;

use crate::domain::models::settings::DomainSettings;
use crate::storage::{KeyValueStore, StorageError};

pub const SETTINGS_KEY: &str = "appSettings";

#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load stored settings; None when nothing has been saved yet
    pub async fn load(&self) -> Result<Option<DomainSettings>, StorageError> {
        let raw = match self.store.get(SETTINGS_KEY).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: SETTINGS_KEY.to_string(),
                source,
            })
    }

    pub async fn save(&self, settings: &DomainSettings) -> Result<(), StorageError> {
        let json = serde_json::to_string(settings).map_err(StorageError::Encode)?;
        self.store.set(SETTINGS_KEY, &json).await?;
        debug!("Saved settings: {:?}", settings);
        Ok(())
    }
}

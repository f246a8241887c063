//! Settings service: the app-wide language and theme.
//!
//! The current settings are held in a `watch` channel so every screen (and
//! the reminder scheduler, which words reminders in the chosen language)
//! reads the same value and can be notified of changes. The service is an
//! explicit context object handed to whoever needs it.

use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use crate::domain::commands::settings::UpdateSettingsCommand;
use crate::domain::models::settings::DomainSettings;
use crate::storage::{SettingsRepository, StorageError};

#[derive(Clone)]
pub struct SettingsService {
    repository: SettingsRepository,
    current: Arc<watch::Sender<DomainSettings>>,
    update_lock: Arc<Mutex<()>>,
}

impl SettingsService {
    /// Load persisted settings. Missing or unreadable settings start from
    /// the defaults; a failing store is still an error.
    pub async fn load(repository: SettingsRepository) -> Result<Self, StorageError> {
        let settings = match repository.load().await {
            Ok(Some(settings)) => settings,
            Ok(None) => DomainSettings::default(),
            Err(StorageError::Corrupt { key, source }) => {
                warn!("Ignoring unreadable settings under '{}': {}", key, source);
                DomainSettings::default()
            }
            Err(e) => return Err(e),
        };

        info!("Loaded settings: {:?}", settings);
        let (sender, _) = watch::channel(settings);
        Ok(Self {
            repository,
            current: Arc::new(sender),
            update_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn current(&self) -> DomainSettings {
        *self.current.borrow()
    }

    /// Apply a partial update, persist it and notify subscribers
    pub async fn update(&self, command: UpdateSettingsCommand) -> Result<DomainSettings, StorageError> {
        let _guard = self.update_lock.lock().await;

        let mut settings = self.current();
        if let Some(language) = command.language {
            settings.language = language;
        }
        if let Some(theme) = command.theme {
            settings.theme = theme;
        }

        self.repository.save(&settings).await?;
        self.current.send_replace(settings);

        info!("Updated settings: {:?}", settings);
        Ok(settings)
    }

    pub fn subscribe(&self) -> watch::Receiver<DomainSettings> {
        self.current.subscribe()
    }
}

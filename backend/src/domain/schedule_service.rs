//! Schedule service: save, edit and delete medicine schedules together
//! with their reminders.
//!
//! ## Save flow
//!
//! 1. Build and validate the schedule from the form (nothing is written on failure)
//! 2. Persist the record
//! 3. Register one daily reminder per alarm time
//! 4. Persist the notification ids on the record
//!
//! The record is kept even when reminders cannot be registered; the
//! result says whether reminders were set, partially set, refused by the
//! user or failed. Editing cancels the old reminders and registers new
//! ones; deleting cancels them before the record goes.
//!
//! Every flow that reads a schedule, talks to the notifier and writes the
//! schedule back runs under one service-wide lock, so a reconciliation
//! never writes back a record an edit has already replaced.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::commands::schedules::{
    DeleteScheduleResult, ReconcileResult, ScheduleForm, ScheduleSaveResult,
};
use crate::domain::models::reminder::{DomainReminderStatus, FailedAlarm, ReminderReport};
use crate::domain::models::schedule::{MedicineSchedule, ScheduleValidationError};
use crate::domain::reminder_scheduler::{ReminderError, ReminderScheduler};
use crate::domain::schedule_builder::ScheduleBuilder;
use crate::domain::settings_service::SettingsService;
use crate::storage::{ScheduleRepository, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ScheduleValidationError),
    #[error("Medicine schedule not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct ScheduleService {
    repository: ScheduleRepository,
    reminders: ReminderScheduler,
    settings: SettingsService,
    write_lock: Arc<Mutex<()>>,
}

impl ScheduleService {
    pub fn new(repository: ScheduleRepository, reminders: ReminderScheduler, settings: SettingsService) -> Self {
        Self {
            repository,
            reminders,
            settings,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create a schedule and register its reminders
    pub async fn create_schedule(&self, form: ScheduleForm) -> Result<ScheduleSaveResult, ScheduleError> {
        info!("Creating schedule for {}", form.medicine_name);
        let _guard = self.write_lock.lock().await;

        let id = MedicineSchedule::generate_id(Utc::now().timestamp_millis() as u64);
        let schedule = ScheduleBuilder::build(form, id)?;
        self.repository.create(&schedule).await?;

        let (schedule, reminders) = self.register_reminders(schedule).await?;
        info!("Created schedule {} ({:?})", schedule.id, reminders.status);

        Ok(ScheduleSaveResult {
            success_message: save_message(&schedule, &reminders),
            schedule,
            reminders,
        })
    }

    pub async fn list_schedules(&self) -> Result<Vec<MedicineSchedule>, ScheduleError> {
        let schedules = self.repository.list().await?;
        info!("Found {} schedules", schedules.len());
        Ok(schedules)
    }

    pub async fn get_schedule(&self, id: &str) -> Result<MedicineSchedule, ScheduleError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
    }

    /// Replace a schedule with a rebuilt one under the same id.
    ///
    /// Alarm times are derived again from the form, the old reminders are
    /// cancelled and new ones registered.
    pub async fn update_schedule(&self, id: &str, form: ScheduleForm) -> Result<ScheduleSaveResult, ScheduleError> {
        info!("Updating schedule {}", id);
        let _guard = self.write_lock.lock().await;

        let existing = self.get_schedule(id).await?;
        let schedule = ScheduleBuilder::build(form, id.to_string())?;

        let cancelled = self.reminders.cancel(&existing.notification_ids).await;
        info!("Cancelled {} old reminders for {}", cancelled, id);

        if !self.repository.update(&schedule).await? {
            return Err(ScheduleError::NotFound(id.to_string()));
        }

        let (schedule, reminders) = self.register_reminders(schedule).await?;
        Ok(ScheduleSaveResult {
            success_message: save_message(&schedule, &reminders),
            schedule,
            reminders,
        })
    }

    /// Cancel a schedule's reminders, then remove it
    pub async fn delete_schedule(&self, id: &str) -> Result<DeleteScheduleResult, ScheduleError> {
        info!("Deleting schedule {}", id);
        let _guard = self.write_lock.lock().await;

        let schedule = self.get_schedule(id).await?;
        let reminders_cancelled = self.reminders.cancel(&schedule.notification_ids).await;

        if !self.repository.delete(id).await? {
            return Err(ScheduleError::NotFound(id.to_string()));
        }

        info!("Deleted schedule {} and {} reminders", id, reminders_cancelled);
        Ok(DeleteScheduleResult {
            id: id.to_string(),
            reminders_cancelled,
            success_message: format!("Schedule for {} deleted", schedule.medicine_name),
        })
    }

    /// Bring registered reminders back in line with the stored schedules.
    ///
    /// Run at startup: known reminders are cancelled, schedules still
    /// running on `today` get fresh ones and ended schedules keep none.
    pub async fn reconcile_reminders(&self, today: NaiveDate) -> Result<ReconcileResult, ScheduleError> {
        let _guard = self.write_lock.lock().await;
        let schedules = self.repository.list().await?;
        let language = self.settings.current().language;
        let mut result = ReconcileResult {
            schedules_checked: schedules.len(),
            ..Default::default()
        };

        let permitted = match self.reminders.ensure_permission().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Not registering reminders during reconciliation: {}", e);
                false
            }
        };

        for schedule in schedules {
            self.reminders.cancel(&schedule.notification_ids).await;

            let mut reconciled = schedule.clone();
            reconciled.notification_ids.clear();

            if !schedule.is_current_on(today) {
                result.expired_schedules += 1;
            } else if permitted {
                let outcome = self.reminders.register_all(&reconciled, language).await;
                result.reminders_registered += outcome.registered.len();
                reconciled.notification_ids = outcome.registered;
            }

            if reconciled.notification_ids != schedule.notification_ids
                && !self.repository.update(&reconciled).await?
            {
                // Deleted while we were registering
                self.reminders.cancel(&reconciled.notification_ids).await;
            }
        }

        info!(
            "Reconciled {} schedules: {} reminders registered, {} expired",
            result.schedules_checked, result.reminders_registered, result.expired_schedules
        );
        Ok(result)
    }

    /// Remove every schedule, including unreadable data, and its reminders
    pub async fn reset_schedules(&self) -> Result<(), ScheduleError> {
        let _guard = self.write_lock.lock().await;
        match self.repository.list().await {
            Ok(schedules) => {
                for schedule in &schedules {
                    self.reminders.cancel(&schedule.notification_ids).await;
                }
            }
            Err(e) => warn!("Resetting schedules without cancelling reminders: {}", e),
        }

        self.repository.clear().await?;
        info!("All schedules removed");
        Ok(())
    }

    /// Register reminders for a persisted schedule and store their ids on it
    async fn register_reminders(
        &self,
        schedule: MedicineSchedule,
    ) -> Result<(MedicineSchedule, ReminderReport), ScheduleError> {
        let language = self.settings.current().language;

        let outcome = match self.reminders.schedule(&schedule, language).await {
            Ok(outcome) => outcome,
            Err(ReminderError::PermissionDenied) => {
                return Ok((schedule, ReminderReport::permission_denied()));
            }
            Err(e @ ReminderError::PermissionUnavailable(_)) => {
                warn!("Reminders for {} not registered: {}", schedule.id, e);
                let reason = e.to_string();
                let failed = schedule
                    .alarm_times
                    .iter()
                    .map(|alarm| FailedAlarm {
                        alarm_time: *alarm,
                        reason: reason.clone(),
                    })
                    .collect();
                let report = ReminderReport {
                    status: DomainReminderStatus::Failed,
                    failed,
                };
                return Ok((schedule, report));
            }
        };

        let report = ReminderReport::from_outcome(&outcome);
        if outcome.registered.is_empty() {
            return Ok((schedule, report));
        }

        let mut schedule = schedule;
        schedule.notification_ids = outcome.registered;
        match self.repository.update(&schedule).await {
            Ok(true) => Ok((schedule, report)),
            Ok(false) => {
                self.reminders.cancel(&schedule.notification_ids).await;
                Err(ScheduleError::NotFound(schedule.id))
            }
            Err(e) => {
                self.reminders.cancel(&schedule.notification_ids).await;
                Err(e.into())
            }
        }
    }
}

fn save_message(schedule: &MedicineSchedule, reminders: &ReminderReport) -> String {
    let name = &schedule.medicine_name;
    match reminders.status {
        DomainReminderStatus::Scheduled => format!(
            "Schedule for {} saved with {} daily reminders",
            name,
            schedule.notification_ids.len()
        ),
        DomainReminderStatus::PartiallyScheduled => format!(
            "Schedule for {} saved, but {} of {} reminders could not be set",
            name,
            reminders.failed.len(),
            schedule.alarm_times.len()
        ),
        DomainReminderStatus::PermissionDenied => format!(
            "Schedule for {} saved. Allow notifications to receive reminders",
            name
        ),
        DomainReminderStatus::Failed => {
            format!("Schedule for {} saved, but reminders could not be set", name)
        }
    }
}

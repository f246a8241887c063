//! Reminder scheduler: registers one daily reminder per alarm time of a
//! schedule with the device's notification service.
//!
//! Permission is checked first and requested at most once per call. Every
//! alarm is registered on its own; a failing alarm is logged and reported
//! back without stopping the others.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::reminder::{
    FailedAlarm, NotificationContent, NotificationData, NotificationRequest, NotificationTrigger,
    PermissionStatus, ReminderOutcome,
};
use crate::domain::models::schedule::{AlarmTime, MedicineSchedule};
use crate::domain::models::settings::DomainLanguage;
use crate::notifications::ReminderNotifier;

#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error("Notification permission was not granted")]
    PermissionDenied,
    #[error("Could not determine notification permission: {0}")]
    PermissionUnavailable(#[source] anyhow::Error),
}

#[derive(Clone)]
pub struct ReminderScheduler {
    notifier: Arc<dyn ReminderNotifier>,
}

impl ReminderScheduler {
    pub fn new(notifier: Arc<dyn ReminderNotifier>) -> Self {
        Self { notifier }
    }

    /// Succeeds if permission is granted, prompting once when it is not
    pub async fn ensure_permission(&self) -> Result<(), ReminderError> {
        let status = self
            .notifier
            .permission_status()
            .await
            .map_err(ReminderError::PermissionUnavailable)?;
        if status == PermissionStatus::Granted {
            return Ok(());
        }

        info!("Notification permission is {:?}, asking the user", status);
        let status = self
            .notifier
            .request_permission()
            .await
            .map_err(ReminderError::PermissionUnavailable)?;
        if status == PermissionStatus::Granted {
            Ok(())
        } else {
            warn!("Notification permission not granted: {:?}", status);
            Err(ReminderError::PermissionDenied)
        }
    }

    /// Check permission, then register every alarm of `schedule`
    pub async fn schedule(
        &self,
        schedule: &MedicineSchedule,
        language: DomainLanguage,
    ) -> Result<ReminderOutcome, ReminderError> {
        self.ensure_permission().await?;
        Ok(self.register_all(schedule, language).await)
    }

    /// Register every alarm of `schedule`, assuming permission was granted
    pub async fn register_all(
        &self,
        schedule: &MedicineSchedule,
        language: DomainLanguage,
    ) -> ReminderOutcome {
        let mut outcome = ReminderOutcome::default();

        for alarm in &schedule.alarm_times {
            let request = Self::build_request(schedule, *alarm, language);
            match self.notifier.schedule_notification(&request).await {
                Ok(id) => outcome.registered.push(id),
                Err(e) => {
                    warn!(
                        "Failed to register {} reminder for schedule {}: {}",
                        alarm, schedule.id, e
                    );
                    outcome.failed.push(FailedAlarm {
                        alarm_time: *alarm,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Registered {}/{} reminders for {}",
            outcome.registered.len(),
            schedule.alarm_times.len(),
            schedule.id
        );
        outcome
    }

    /// Best-effort cancellation. Returns how many reminders were removed.
    pub async fn cancel(&self, ids: &[String]) -> usize {
        let mut cancelled = 0;
        for id in ids {
            match self.notifier.cancel_notification(id).await {
                Ok(true) => cancelled += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to cancel reminder {}: {}", id, e),
            }
        }
        cancelled
    }

    /// Daily repeating reminder for one alarm time
    pub fn build_request(
        schedule: &MedicineSchedule,
        alarm: AlarmTime,
        language: DomainLanguage,
    ) -> NotificationRequest {
        let (title, body) = match language {
            DomainLanguage::Indonesian => (
                format!("Waktunya minum obat: {}", schedule.medicine_name),
                format!("Dosis {}, {}", schedule.dosage_label(), schedule.usage_time),
            ),
            DomainLanguage::English => (
                format!("Time to take your medicine: {}", schedule.medicine_name),
                format!("Dose {}, {}", schedule.dosage_label(), schedule.usage_time),
            ),
        };

        NotificationRequest {
            content: NotificationContent {
                title,
                body,
                data: NotificationData {
                    medicine_id: schedule.id.clone(),
                },
            },
            trigger: NotificationTrigger::daily_at(alarm),
        }
    }
}

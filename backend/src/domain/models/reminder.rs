use serde::{Deserialize, Serialize};

use super::schedule::AlarmTime;

/// Whether the user allowed the app to show reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// A single notification registration, in the shape the notification
/// service accepts: `{ content: { title, body, data }, trigger }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub content: NotificationContent,
    pub trigger: NotificationTrigger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub data: NotificationData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub medicine_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationTrigger {
    /// Fires at a wall-clock time, every day when `repeats` is set
    Calendar { hour: u8, minute: u8, repeats: bool },
}

impl NotificationTrigger {
    pub fn daily_at(time: AlarmTime) -> Self {
        NotificationTrigger::Calendar {
            hour: time.hour(),
            minute: time.minute(),
            repeats: true,
        }
    }
}

/// An alarm time whose reminder could not be registered
#[derive(Debug, Clone, PartialEq)]
pub struct FailedAlarm {
    pub alarm_time: AlarmTime,
    pub reason: String,
}

/// Per-alarm result of registering a schedule's reminders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderOutcome {
    /// Notification ids, one per successfully registered alarm
    pub registered: Vec<String>,
    pub failed: Vec<FailedAlarm>,
}

impl ReminderOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Overall reminder state reported back after saving a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainReminderStatus {
    Scheduled,
    PartiallyScheduled,
    PermissionDenied,
    Failed,
}

/// Reminder side of a schedule save: the status plus any failed alarms
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderReport {
    pub status: DomainReminderStatus,
    pub failed: Vec<FailedAlarm>,
}

impl ReminderReport {
    pub fn from_outcome(outcome: &ReminderOutcome) -> Self {
        let status = if outcome.failed.is_empty() {
            DomainReminderStatus::Scheduled
        } else if outcome.registered.is_empty() {
            DomainReminderStatus::Failed
        } else {
            DomainReminderStatus::PartiallyScheduled
        };
        Self {
            status,
            failed: outcome.failed.clone(),
        }
    }

    pub fn permission_denied() -> Self {
        Self {
            status: DomainReminderStatus::PermissionDenied,
            failed: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_request_wire_shape() {
        let request = NotificationRequest {
            content: NotificationContent {
                title: "Time to take Paracetamol".to_string(),
                body: "500 mg, after meal".to_string(),
                data: NotificationData {
                    medicine_id: "schedule::1".to_string(),
                },
            },
            trigger: NotificationTrigger::daily_at(AlarmTime::new(12, 0).unwrap()),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "content": {
                    "title": "Time to take Paracetamol",
                    "body": "500 mg, after meal",
                    "data": { "medicineId": "schedule::1" }
                },
                "trigger": { "type": "calendar", "hour": 12, "minute": 0, "repeats": true }
            })
        );
    }

    #[test]
    fn test_report_status_from_outcome() {
        let failed = FailedAlarm {
            alarm_time: AlarmTime::new(8, 0).unwrap(),
            reason: "backend unavailable".to_string(),
        };

        let all_ok = ReminderOutcome {
            registered: vec!["n1".to_string()],
            failed: vec![],
        };
        assert_eq!(ReminderReport::from_outcome(&all_ok).status, DomainReminderStatus::Scheduled);

        let partial = ReminderOutcome {
            registered: vec!["n1".to_string()],
            failed: vec![failed.clone()],
        };
        assert_eq!(
            ReminderReport::from_outcome(&partial).status,
            DomainReminderStatus::PartiallyScheduled
        );

        let none = ReminderOutcome {
            registered: vec![],
            failed: vec![failed],
        };
        assert_eq!(ReminderReport::from_outcome(&none).status, DomainReminderStatus::Failed);
    }
}

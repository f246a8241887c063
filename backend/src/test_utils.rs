//! Shared fixtures for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::commands::schedules::ScheduleForm;
use crate::domain::models::reminder::{NotificationRequest, NotificationTrigger, PermissionStatus};
use crate::domain::models::schedule::{AlarmTime, MedicineSchedule};
use crate::notifications::ReminderNotifier;
use crate::storage::{KeyValueStore, MemoryStore};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Paracetamol 500 mg, three times a day for a week
pub fn sample_form() -> ScheduleForm {
    ScheduleForm {
        medicine_name: "Paracetamol".to_string(),
        medicine_type: "analgesic".to_string(),
        medicine_type_other: None,
        disease: "fever".to_string(),
        disease_other: None,
        medicine_form: "tablet".to_string(),
        dosage_amount: "500".to_string(),
        dosage_unit: "mg".to_string(),
        spoon_size: None,
        notes: None,
        usage_time: "after meal".to_string(),
        times_per_day: 3,
        must_finish: true,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 1, 8),
        medicine_image: None,
        doctor_name: None,
    }
}

pub fn sample_schedule(id: &str, name: &str) -> MedicineSchedule {
    MedicineSchedule {
        id: id.to_string(),
        medicine_name: name.to_string(),
        medicine_type: "analgesic".to_string(),
        disease: "fever".to_string(),
        medicine_form: "tablet".to_string(),
        dosage_amount: "500".to_string(),
        dosage_unit: "mg".to_string(),
        spoon_size: None,
        notes: None,
        usage_time: "after meal".to_string(),
        times_per_day: 3,
        alarm_times: ["08:00", "12:00", "16:00"]
            .iter()
            .map(|t| t.parse::<AlarmTime>().unwrap())
            .collect(),
        must_finish: true,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 1, 8),
        medicine_image: None,
        doctor_name: None,
        notification_ids: vec![],
    }
}

pub fn memory_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

/// Notifier whose permission answers and failures are set up front.
/// Records every registration so tests can inspect the requests.
pub struct ScriptedNotifier {
    permission: Mutex<PermissionStatus>,
    prompt_answer: PermissionStatus,
    status_unavailable: bool,
    failing_hours: Vec<u8>,
    active: Mutex<Vec<(String, NotificationRequest)>>,
    cancelled: Mutex<Vec<String>>,
    permission_requests: AtomicUsize,
    next_id: AtomicUsize,
}

impl ScriptedNotifier {
    fn with_permission(permission: PermissionStatus, prompt_answer: PermissionStatus) -> Self {
        Self {
            permission: Mutex::new(permission),
            prompt_answer,
            status_unavailable: false,
            failing_hours: Vec::new(),
            active: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
            permission_requests: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
        }
    }

    pub fn granted() -> Self {
        Self::with_permission(PermissionStatus::Granted, PermissionStatus::Granted)
    }

    pub fn denied() -> Self {
        Self::with_permission(PermissionStatus::Denied, PermissionStatus::Denied)
    }

    /// Undetermined until prompted, then `answer`
    pub fn undetermined(answer: PermissionStatus) -> Self {
        Self::with_permission(PermissionStatus::Undetermined, answer)
    }

    /// Registration fails for alarms at `hour`
    pub fn failing_at(mut self, hour: u8) -> Self {
        self.failing_hours.push(hour);
        self
    }

    /// Permission checks themselves fail
    pub fn status_unavailable(mut self) -> Self {
        self.status_unavailable = true;
        self
    }

    pub fn set_permission(&self, status: PermissionStatus) {
        *self.permission.lock().unwrap() = status;
    }

    /// Requests still registered, in registration order
    pub fn scheduled_requests(&self) -> Vec<NotificationRequest> {
        self.active.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }

    pub fn active_ids(&self) -> Vec<String> {
        self.active.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn cancelled_ids(&self) -> Vec<String> {
        self.cancelled.lock().unwrap().clone()
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReminderNotifier for ScriptedNotifier {
    async fn permission_status(&self) -> Result<PermissionStatus> {
        if self.status_unavailable {
            bail!("notification service unavailable");
        }
        Ok(*self.permission.lock().unwrap())
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        let mut permission = self.permission.lock().unwrap();
        if *permission == PermissionStatus::Undetermined {
            *permission = self.prompt_answer;
        }
        Ok(*permission)
    }

    async fn schedule_notification(&self, request: &NotificationRequest) -> Result<String> {
        // Give concurrently joined flows a chance to interleave
        tokio::task::yield_now().await;
        let NotificationTrigger::Calendar { hour, .. } = request.trigger;
        if self.failing_hours.contains(&hour) {
            return Err(anyhow!("scripted failure at {:02}:00", hour));
        }
        let id = format!("notification::{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.active.lock().unwrap().push((id.clone(), request.clone()));
        Ok(id)
    }

    async fn cancel_notification(&self, id: &str) -> Result<bool> {
        let mut active = self.active.lock().unwrap();
        let before = active.len();
        active.retain(|(existing, _)| existing != id);
        let removed = active.len() != before;
        if removed {
            self.cancelled.lock().unwrap().push(id.to_string());
        }
        Ok(removed)
    }
}

//! In-process reminder delivery.
//!
//! A reminder registered with a calendar trigger fires every time the
//! local wall clock passes its `HH:MM`. Each tick examines the window
//! between the previous tick and now, so a reminder fires once per day no
//! matter how the tick interval lines up with minute boundaries. After a
//! long pause (suspended laptop, stopped process) only the last few
//! minutes are caught up; older alarms are skipped rather than delivered
//! in a burst.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, NaiveDateTime, Timelike, Utc};
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::traits::ReminderNotifier;
use crate::domain::models::reminder::{NotificationRequest, NotificationTrigger, PermissionStatus};

/// Oldest alarm a late tick still delivers
const MAX_CATCH_UP_MINUTES: i64 = 5;
const FIRED_CHANNEL_CAPACITY: usize = 64;

/// A reminder currently registered with the service
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredNotification {
    pub id: String,
    pub request: NotificationRequest,
    pub registered_at: DateTime<Utc>,
}

/// A reminder that came due
#[derive(Debug, Clone, PartialEq)]
pub struct FiredReminder {
    pub notification_id: String,
    pub medicine_id: String,
    pub title: String,
    pub body: String,
    pub fired_at: NaiveDateTime,
}

#[derive(Clone)]
pub struct LocalReminderService {
    inner: Arc<Inner>,
}

struct Inner {
    reminders: RwLock<BTreeMap<String, RegisteredNotification>>,
    permission: RwLock<PermissionStatus>,
    /// What the user answers when prompted while the status is undetermined
    prompt_answer: PermissionStatus,
    last_tick: Mutex<Option<NaiveDateTime>>,
    fired: broadcast::Sender<FiredReminder>,
}

impl LocalReminderService {
    /// Service starting with `permission`; an undetermined permission is
    /// granted when prompted.
    pub fn new(permission: PermissionStatus) -> Self {
        Self::with_prompt_answer(permission, PermissionStatus::Granted)
    }

    pub fn with_prompt_answer(permission: PermissionStatus, prompt_answer: PermissionStatus) -> Self {
        let (fired, _) = broadcast::channel(FIRED_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                reminders: RwLock::new(BTreeMap::new()),
                permission: RwLock::new(permission),
                prompt_answer,
                last_tick: Mutex::new(None),
                fired,
            }),
        }
    }

    /// Change the permission, as the user would from the system settings
    pub async fn set_permission(&self, status: PermissionStatus) {
        info!("Notification permission set to {:?}", status);
        *self.inner.permission.write().await = status;
    }

    /// Every registered reminder, ordered by notification id
    pub async fn registered(&self) -> Vec<RegisteredNotification> {
        self.inner.reminders.read().await.values().cloned().collect()
    }

    /// Receive every reminder as it fires
    pub fn subscribe(&self) -> broadcast::Receiver<FiredReminder> {
        self.inner.fired.subscribe()
    }

    /// Deliver every reminder that came due since the previous call.
    ///
    /// The first call only covers the current minute. A clock that moved
    /// backwards delivers nothing and restarts the window at `now`.
    pub async fn fire_due(&self, now: NaiveDateTime) -> Vec<FiredReminder> {
        let mut last_tick = self.inner.last_tick.lock().await;
        let window_start = match *last_tick {
            Some(previous) if previous >= now => {
                *last_tick = Some(now);
                return Vec::new();
            }
            Some(previous) => previous.max(now - Duration::minutes(MAX_CATCH_UP_MINUTES)),
            None => start_of_minute(now) - Duration::seconds(1),
        };
        *last_tick = Some(now);

        let mut reminders = self.inner.reminders.write().await;
        let due: Vec<RegisteredNotification> = reminders
            .values()
            .filter(|r| is_due(&r.request.trigger, window_start, now))
            .cloned()
            .collect();

        let mut fired = Vec::with_capacity(due.len());
        for registration in due {
            let NotificationTrigger::Calendar { repeats, .. } = registration.request.trigger;
            if !repeats {
                reminders.remove(&registration.id);
            }

            let reminder = FiredReminder {
                notification_id: registration.id,
                medicine_id: registration.request.content.data.medicine_id,
                title: registration.request.content.title,
                body: registration.request.content.body,
                fired_at: now,
            };
            info!("Reminder: {} ({})", reminder.title, reminder.body);
            if self.inner.fired.send(reminder.clone()).is_err() {
                debug!("No subscribers for reminder {}", reminder.notification_id);
            }
            fired.push(reminder);
        }

        fired
    }

    /// Start the background loop that fires due reminders every `tick`
    pub fn run(&self, tick: StdDuration) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            info!("Reminder dispatcher started, checking every {:?}", tick);
            let mut interval = tokio::time::interval(tick);

            loop {
                interval.tick().await;
                service.fire_due(Local::now().naive_local()).await;
            }
        })
    }
}

#[async_trait]
impl ReminderNotifier for LocalReminderService {
    async fn permission_status(&self) -> Result<PermissionStatus> {
        Ok(*self.inner.permission.read().await)
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        let mut permission = self.inner.permission.write().await;
        if *permission == PermissionStatus::Undetermined {
            *permission = self.inner.prompt_answer;
            info!("Notification permission prompt answered: {:?}", *permission);
        }
        Ok(*permission)
    }

    async fn schedule_notification(&self, request: &NotificationRequest) -> Result<String> {
        if *self.inner.permission.read().await != PermissionStatus::Granted {
            bail!("Notification permission has not been granted");
        }

        let id = format!("notification::{}", uuid::Uuid::new_v4());
        let registration = RegisteredNotification {
            id: id.clone(),
            request: request.clone(),
            registered_at: Utc::now(),
        };
        self.inner.reminders.write().await.insert(id.clone(), registration);

        debug!("Registered reminder {} for {}", id, request.content.data.medicine_id);
        Ok(id)
    }

    async fn cancel_notification(&self, id: &str) -> Result<bool> {
        let removed = self.inner.reminders.write().await.remove(id).is_some();
        debug!("Cancel reminder {}: removed={}", id, removed);
        Ok(removed)
    }
}

fn start_of_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.date().and_hms_opt(at.hour(), at.minute(), 0).unwrap_or(at)
}

/// Whether the trigger's wall-clock time falls in `(after, until]`
fn is_due(trigger: &NotificationTrigger, after: NaiveDateTime, until: NaiveDateTime) -> bool {
    let NotificationTrigger::Calendar { hour, minute, .. } = *trigger;
    [until.date().pred_opt(), Some(until.date())]
        .into_iter()
        .flatten()
        .filter_map(|day| day.and_hms_opt(u32::from(hour), u32::from(minute), 0))
        .any(|at| after < at && at <= until)
}

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::reminder::{NotificationRequest, PermissionStatus};

/// Capability to show scheduled local reminders on the device.
///
/// Implementations own the registrations; callers only keep the returned
/// notification ids so they can cancel them later.
#[async_trait]
pub trait ReminderNotifier: Send + Sync {
    /// Current permission without prompting the user
    async fn permission_status(&self) -> Result<PermissionStatus>;

    /// Ask the user for permission. Returns the status after the prompt.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Register a reminder and return its notification id
    async fn schedule_notification(&self, request: &NotificationRequest) -> Result<String>;

    /// Returns false if no reminder with `id` was registered
    async fn cancel_notification(&self, id: &str) -> Result<bool>;
}

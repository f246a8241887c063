use shared::{NotificationPermission, RegisteredReminder, ReminderListResponse};

use crate::domain::models::reminder::{NotificationTrigger, PermissionStatus};
use crate::notifications::RegisteredNotification;

pub struct ReminderMapper;

impl ReminderMapper {
    pub fn to_dto(domain: RegisteredNotification) -> RegisteredReminder {
        let NotificationTrigger::Calendar { hour, minute, repeats } = domain.request.trigger;
        RegisteredReminder {
            notification_id: domain.id,
            medicine_id: domain.request.content.data.medicine_id,
            title: domain.request.content.title,
            body: domain.request.content.body,
            time: format!("{:02}:{:02}", hour, minute),
            repeats,
        }
    }

    pub fn to_list_dto(reminders: Vec<RegisteredNotification>) -> ReminderListResponse {
        ReminderListResponse {
            reminders: reminders.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_permission_dto(status: PermissionStatus) -> NotificationPermission {
        match status {
            PermissionStatus::Granted => NotificationPermission::Granted,
            PermissionStatus::Denied => NotificationPermission::Denied,
            PermissionStatus::Undetermined => NotificationPermission::Undetermined,
        }
    }

    pub fn to_permission_domain(dto: NotificationPermission) -> PermissionStatus {
        match dto {
            NotificationPermission::Granted => PermissionStatus::Granted,
            NotificationPermission::Denied => PermissionStatus::Denied,
            NotificationPermission::Undetermined => PermissionStatus::Undetermined,
        }
    }
}

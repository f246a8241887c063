//! # REST API for Reminders
//!
//! Lists the reminders currently registered and exposes the notification
//! permission, which a UI shell reports back after asking the user.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use shared::{ErrorResponse, NotificationPermissionResponse, UpdateNotificationPermissionRequest};
use tracing::{error, info, warn};

use super::error::ApiJson;
use super::mappers::ReminderMapper;
use crate::domain::models::reminder::PermissionStatus;
use crate::notifications::ReminderNotifier;
use crate::AppState;

/// List every registered reminder
pub async fn list_reminders(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/reminders");

    let reminders = state.reminder_service.registered().await;
    (StatusCode::OK, Json(ReminderMapper::to_list_dto(reminders)))
}

/// Current notification permission
pub async fn get_permission(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/reminders/permission");

    match state.reminder_service.permission_status().await {
        Ok(status) => (
            StatusCode::OK,
            Json(NotificationPermissionResponse {
                status: ReminderMapper::to_permission_dto(status),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to read notification permission: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Notification permission is unavailable")),
            )
                .into_response()
        }
    }
}

/// Record a permission change. Granting it registers reminders for the
/// schedules that are still running.
pub async fn update_permission(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateNotificationPermissionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/reminders/permission - request: {:?}", request);

    let status = ReminderMapper::to_permission_domain(request.status);
    state.reminder_service.set_permission(status).await;

    if status == PermissionStatus::Granted {
        let today = Local::now().date_naive();
        if let Err(e) = state.schedule_service.reconcile_reminders(today).await {
            warn!("Could not register reminders after permission was granted: {}", e);
        }
    }

    (
        StatusCode::OK,
        Json(NotificationPermissionResponse {
            status: ReminderMapper::to_permission_dto(status),
        }),
    )
}

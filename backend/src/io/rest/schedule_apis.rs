//! # REST API for Medicine Schedules
//!
//! Endpoints for creating, listing, editing and deleting schedules, plus
//! reminder reconciliation and a reset for unreadable schedule data.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use shared::{ResetSchedulesResponse, ScheduleFormRequest};
use tracing::{error, info, warn};

use super::error::{ApiError, ApiJson};
use super::mappers::ScheduleMapper;
use crate::AppState;

/// Create a new schedule and register its reminders
pub async fn create_schedule(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScheduleFormRequest>,
) -> impl IntoResponse {
    info!("POST /api/schedules - medicine: {}", request.medicine_name);

    let form = match ScheduleMapper::to_form(request) {
        Ok(form) => form,
        Err(e) => {
            warn!("Rejected schedule form: {}", e);
            return ApiError::from(e).into_response();
        }
    };

    match state.schedule_service.create_schedule(form).await {
        Ok(result) => (StatusCode::CREATED, Json(ScheduleMapper::to_save_response(result))).into_response(),
        Err(e) => {
            error!("Failed to create schedule: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// List all schedules
pub async fn list_schedules(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/schedules");

    match state.schedule_service.list_schedules().await {
        Ok(schedules) => (StatusCode::OK, Json(ScheduleMapper::to_list_dto(schedules))).into_response(),
        Err(e) => {
            error!("Failed to list schedules: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Get a schedule by ID
pub async fn get_schedule(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/schedules/{}", id);

    match state.schedule_service.get_schedule(&id).await {
        Ok(schedule) => (StatusCode::OK, Json(ScheduleMapper::to_dto(schedule))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Replace a schedule with the submitted form
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ScheduleFormRequest>,
) -> impl IntoResponse {
    info!("PUT /api/schedules/{} - medicine: {}", id, request.medicine_name);

    let form = match ScheduleMapper::to_form(request) {
        Ok(form) => form,
        Err(e) => {
            warn!("Rejected schedule form: {}", e);
            return ApiError::from(e).into_response();
        }
    };

    match state.schedule_service.update_schedule(&id, form).await {
        Ok(result) => (StatusCode::OK, Json(ScheduleMapper::to_save_response(result))).into_response(),
        Err(e) => {
            error!("Failed to update schedule {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Delete a schedule and cancel its reminders
pub async fn delete_schedule(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/schedules/{}", id);

    match state.schedule_service.delete_schedule(&id).await {
        Ok(result) => (StatusCode::OK, Json(ScheduleMapper::to_delete_response(result))).into_response(),
        Err(e) => {
            error!("Failed to delete schedule {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Re-register reminders for every schedule still running today
pub async fn reconcile_reminders(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/schedules/reconcile");

    let today = Local::now().date_naive();
    match state.schedule_service.reconcile_reminders(today).await {
        Ok(result) => (StatusCode::OK, Json(ScheduleMapper::to_reconcile_response(result))).into_response(),
        Err(e) => {
            error!("Failed to reconcile reminders: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Remove every schedule, including unreadable data
pub async fn reset_schedules(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/schedules");

    match state.schedule_service.reset_schedules().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ResetSchedulesResponse {
                success_message: "All medicine schedules have been removed".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to reset schedules: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

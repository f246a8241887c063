//! # REST API for App Settings

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use shared::UpdateSettingsRequest;
use tracing::{error, info, warn};

use super::error::{ApiError, ApiJson};
use super::mappers::SettingsMapper;
use crate::AppState;

/// Current language and theme
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings");

    (StatusCode::OK, Json(SettingsMapper::to_dto(state.settings_service.current())))
}

/// Partially update settings. A language change re-registers reminders
/// so their text follows the new language.
pub async fn update_settings(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateSettingsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings - request: {:?}", request);

    let previous_language = state.settings_service.current().language;
    match state
        .settings_service
        .update(SettingsMapper::to_command(request))
        .await
    {
        Ok(settings) => {
            if settings.language != previous_language {
                let today = Local::now().date_naive();
                if let Err(e) = state.schedule_service.reconcile_reminders(today).await {
                    warn!("Reminders keep their old language: {}", e);
                }
            }
            (StatusCode::OK, Json(SettingsMapper::to_dto(settings))).into_response()
        }
        Err(e) => {
            error!("Failed to update settings: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

//! # REST API for Health Tracking
//!
//! BMI calculator plus the vital signs and symptom logs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{BmiRequest, RecordSymptomRequest, RecordVitalSignsRequest};
use tracing::{error, info};

use super::error::{ApiError, ApiJson};
use super::mappers::HealthMapper;
use crate::domain::HealthService;
use crate::AppState;

/// Calculate BMI and its category
pub async fn calculate_bmi(ApiJson(request): ApiJson<BmiRequest>) -> impl IntoResponse {
    info!("POST /api/health/bmi - request: {:?}", request);

    match HealthService::calculate_bmi(request.weight_kg, request.height_cm) {
        Ok(result) => (StatusCode::OK, Json(HealthMapper::to_bmi_dto(result))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_vitals(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/health/vitals");

    match state.health_service.list_vitals().await {
        Ok(entries) => (StatusCode::OK, Json(HealthMapper::to_vitals_list_dto(entries))).into_response(),
        Err(e) => {
            error!("Failed to list vital signs: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn record_vitals(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecordVitalSignsRequest>,
) -> impl IntoResponse {
    info!("POST /api/health/vitals - request: {:?}", request);

    match state
        .health_service
        .record_vitals(HealthMapper::to_vitals_command(request))
        .await
    {
        Ok(entry) => (StatusCode::CREATED, Json(HealthMapper::to_vitals_dto(entry))).into_response(),
        Err(e) => {
            error!("Failed to record vital signs: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn delete_vitals(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/health/vitals/{}", id);

    match state.health_service.delete_vitals(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_symptoms(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/health/symptoms");

    match state.health_service.list_symptoms().await {
        Ok(entries) => (StatusCode::OK, Json(HealthMapper::to_symptom_list_dto(entries))).into_response(),
        Err(e) => {
            error!("Failed to list symptoms: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn record_symptom(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecordSymptomRequest>,
) -> impl IntoResponse {
    info!("POST /api/health/symptoms - severity: {:?}", request.severity);

    match state
        .health_service
        .record_symptom(HealthMapper::to_symptom_command(request))
        .await
    {
        Ok(entry) => (StatusCode::CREATED, Json(HealthMapper::to_symptom_dto(entry))).into_response(),
        Err(e) => {
            error!("Failed to record symptom: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn delete_symptom(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/health/symptoms/{}", id);

    match state.health_service.delete_symptom(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

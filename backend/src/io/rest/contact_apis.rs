//! # REST API for Contacts

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::ContactRequest;
use tracing::{error, info};

use super::error::{ApiError, ApiJson};
use super::mappers::ContactMapper;
use crate::AppState;

pub async fn list_contacts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/contacts");

    match state.contact_service.list_contacts().await {
        Ok(contacts) => (StatusCode::OK, Json(ContactMapper::to_list_dto(contacts))).into_response(),
        Err(e) => {
            error!("Failed to list contacts: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn create_contact(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> impl IntoResponse {
    info!("POST /api/contacts - name: {}", request.name);

    match state
        .contact_service
        .create_contact(ContactMapper::to_command(request))
        .await
    {
        Ok(contact) => (StatusCode::CREATED, Json(ContactMapper::to_dto(contact))).into_response(),
        Err(e) => {
            error!("Failed to create contact: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> impl IntoResponse {
    info!("PUT /api/contacts/{}", id);

    match state
        .contact_service
        .update_contact(&id, ContactMapper::to_command(request))
        .await
    {
        Ok(contact) => (StatusCode::OK, Json(ContactMapper::to_dto(contact))).into_response(),
        Err(e) => {
            error!("Failed to update contact {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn delete_contact(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/contacts/{}", id);

    match state.contact_service.delete_contact(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete contact {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

//! Translation of domain errors into HTTP responses.
//!
//! Every error body is an [`ErrorResponse`]. Validation failures name the
//! offending form field; storage failures are logged in full and reported
//! with a generic message.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::error;

use crate::domain::models::contact::ContactValidationError;
use crate::domain::models::health::HealthValidationError;
use crate::domain::models::schedule::ScheduleValidationError;
use crate::domain::{ContactError, HealthError, ScheduleError};
use crate::storage::StorageError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn validation(message: impl Into<String>, field: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::for_field(message, field),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorResponse::new(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// JSON request body whose rejections answer with an [`ErrorResponse`]
/// instead of axum's plain-text 422
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let body = match missing_field(&message) {
            Some(field) => ErrorResponse::for_field(message.clone(), field),
            None => ErrorResponse::new(message),
        };
        Self {
            status: StatusCode::BAD_REQUEST,
            body,
        }
    }
}

/// Field name out of serde's "missing field `name`" message
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.split("missing field `").nth(1)?;
    rest.split('`').next()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::DuplicateId(id) => Self {
                status: StatusCode::CONFLICT,
                body: ErrorResponse::new(format!("A record with id '{}' already exists", id)),
            },
            other => {
                error!("Storage failure: {:?}", other);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorResponse::new("Stored data could not be accessed"),
                }
            }
        }
    }
}

impl From<ScheduleValidationError> for ApiError {
    fn from(e: ScheduleValidationError) -> Self {
        Self::validation(e.to_string(), e.field())
    }
}

impl From<HealthValidationError> for ApiError {
    fn from(e: HealthValidationError) -> Self {
        Self::validation(e.to_string(), e.field())
    }
}

impl From<ContactValidationError> for ApiError {
    fn from(e: ContactValidationError) -> Self {
        Self::validation(e.to_string(), e.field())
    }
}

impl From<ScheduleError> for ApiError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::Validation(e) => e.into(),
            ScheduleError::NotFound(id) => Self::not_found(format!("Medicine schedule not found: {}", id)),
            ScheduleError::Storage(e) => e.into(),
        }
    }
}

impl From<HealthError> for ApiError {
    fn from(e: HealthError) -> Self {
        match e {
            HealthError::Validation(e) => e.into(),
            HealthError::NotFound(id) => Self::not_found(format!("Health entry not found: {}", id)),
            HealthError::Storage(e) => e.into(),
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(e: ContactError) -> Self {
        match e {
            ContactError::Validation(e) => e.into(),
            ContactError::NotFound(id) => Self::not_found(format!("Contact not found: {}", id)),
            ContactError::Storage(e) => e.into(),
        }
    }
}

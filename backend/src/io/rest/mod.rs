//! # REST API Interface Layer
//!
//! HTTP endpoints a UI shell uses to drive the app. This layer handles:
//! - JSON request/response serialization with the `shared` DTOs
//! - Mapping DTOs to domain commands and back
//! - Translating domain errors into HTTP status codes
//! - Request logging
//!
//! ## Error Responses
//!
//! - Validation failure: 400 with `{ "error", "field" }`
//! - Unknown id: 404
//! - Duplicate id: 409
//! - Unreadable data or store failure: 500 with a generic message
//!
//! Handlers hold no business logic; everything is delegated to the
//! domain services in [`crate::AppState`].

pub mod contact_apis;
pub mod error;
pub mod health_apis;
pub mod mappers;
pub mod reminder_apis;
pub mod schedule_apis;
pub mod settings_apis;

pub use error::{ApiError, ApiJson};

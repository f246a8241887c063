//! # Lansia Helper Backend
//!
//! Local backend for an elderly-care companion app: medicine schedules with
//! daily reminders, health self-tracking, emergency contacts and display
//! settings. A UI shell talks to it over HTTP on the same device.
//!
//! ## Architecture
//!
//! ```text
//! UI shell
//!     ↓
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (services, validation, reminder scheduling)
//!     ↓                         ↓
//! Storage Layer (key/value)   Notifications (local reminders)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize storage, notifications and services into [`AppState`]
//! - Set up the REST API router with CORS for the UI origin

pub mod config;
pub mod domain;
pub mod io;
pub mod notifications;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::domain::{
    ContactService, HealthService, ReminderScheduler, ScheduleService, SettingsService,
};
use crate::notifications::LocalReminderService;
use crate::storage::{
    ContactRepository, DbConnection, HealthRepository, KeyValueStore, MemoryStore,
    ScheduleRepository, SettingsRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub schedule_service: ScheduleService,
    pub settings_service: SettingsService,
    pub health_service: HealthService,
    pub contact_service: ContactService,
    pub reminder_service: LocalReminderService,
}

/// Initialize the backend from configuration
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage");
    let store: Arc<dyn KeyValueStore> = match config.storage_backend {
        StorageBackend::Sqlite => Arc::new(DbConnection::open(config.database_path()).await?),
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let reminder_service = LocalReminderService::new(config.notification_permission);
    initialize_backend_with(store, reminder_service).await
}

/// Initialize the backend on an existing store and reminder service
pub async fn initialize_backend_with(
    store: Arc<dyn KeyValueStore>,
    reminder_service: LocalReminderService,
) -> Result<AppState> {
    info!("Setting up domain model");
    let settings_service = SettingsService::load(SettingsRepository::new(store.clone())).await?;
    let reminder_scheduler = ReminderScheduler::new(Arc::new(reminder_service.clone()));
    let schedule_service = ScheduleService::new(
        ScheduleRepository::new(store.clone()),
        reminder_scheduler,
        settings_service.clone(),
    );
    let health_service = HealthService::new(HealthRepository::new(store.clone()));
    let contact_service = ContactService::new(ContactRepository::new(store));

    info!("Setting up application state");
    Ok(AppState {
        schedule_service,
        settings_service,
        health_service,
        contact_service,
        reminder_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;

    // CORS setup to allow the UI to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/schedules",
            get(io::schedule_apis::list_schedules)
                .post(io::schedule_apis::create_schedule)
                .delete(io::schedule_apis::reset_schedules),
        )
        .route("/schedules/reconcile", post(io::schedule_apis::reconcile_reminders))
        .route(
            "/schedules/:id",
            get(io::schedule_apis::get_schedule)
                .put(io::schedule_apis::update_schedule)
                .delete(io::schedule_apis::delete_schedule),
        )
        .route("/reminders", get(io::reminder_apis::list_reminders))
        .route(
            "/reminders/permission",
            get(io::reminder_apis::get_permission).put(io::reminder_apis::update_permission),
        )
        .route(
            "/settings",
            get(io::settings_apis::get_settings).put(io::settings_apis::update_settings),
        )
        .route("/health/bmi", post(io::health_apis::calculate_bmi))
        .route(
            "/health/vitals",
            get(io::health_apis::list_vitals).post(io::health_apis::record_vitals),
        )
        .route("/health/vitals/:id", delete(io::health_apis::delete_vitals))
        .route(
            "/health/symptoms",
            get(io::health_apis::list_symptoms).post(io::health_apis::record_symptom),
        )
        .route("/health/symptoms/:id", delete(io::health_apis::delete_symptom))
        .route(
            "/contacts",
            get(io::contact_apis::list_contacts).post(io::contact_apis::create_contact),
        )
        .route(
            "/contacts/:id",
            put(io::contact_apis::update_contact).delete(io::contact_apis::delete_contact),
        );

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

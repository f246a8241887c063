//! # Domain Module
//!
//! Contains all business logic for Lansia Helper.
//!
//! This module holds the rules for medicine schedules and their reminders,
//! the health self-tracking logs, emergency contacts and app settings. It
//! works against the storage layer and the notification capability only,
//! never against HTTP or a concrete database.
//!
//! ## Module Organization
//!
//! - **schedule_builder**: Form validation and alarm time derivation
//! - **reminder_scheduler**: Permission handling and per-alarm reminder registration
//! - **schedule_service**: Create, edit, delete and reconcile schedules with their reminders
//! - **settings_service**: Language and theme shared across the app
//! - **health_service**: BMI calculator, vital signs and symptom logs
//! - **contact_service**: Family and doctor shortcuts
//!
//! ## Core Concepts
//!
//! - **Medicine Schedule**: One prescribed regimen with its daily alarm times
//! - **Alarm Time**: A wall-clock `HH:MM`, derived from the doses per day
//! - **Reminder**: A daily repeating local notification for one alarm time
//! - **Reconciliation**: Re-deriving registered reminders from stored schedules
//!
//! ## Business Rules
//!
//! - A schedule ends strictly after it starts
//! - Doses per day are between 1 and 6; alarms start at 08:00, 4 hours apart
//! - A schedule is saved even when its reminders cannot be registered
//! - Editing or deleting a schedule cancels the reminders registered for it

pub mod commands;
pub mod contact_service;
pub mod health_service;
pub mod models;
pub mod reminder_scheduler;
pub mod schedule_builder;
pub mod schedule_service;
pub mod settings_service;

pub use contact_service::{ContactError, ContactService};
pub use health_service::{HealthError, HealthService};
pub use reminder_scheduler::{ReminderError, ReminderScheduler};
pub use schedule_builder::ScheduleBuilder;
pub use schedule_service::{ScheduleError, ScheduleService};
pub use settings_service::SettingsService;

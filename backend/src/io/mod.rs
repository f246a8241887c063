//! # IO Module
//!
//! The interface layer between a UI shell and the domain logic.
//!
//! Translates HTTP requests into domain operations and domain results into
//! JSON responses. Axum extractors inject the services from
//! [`crate::AppState`]; Serde handles the wire format.
//!
//! ## Supported Operations
//!
//! - **/api/schedules**: Medicine schedules and reminder reconciliation
//! - **/api/reminders**: Registered reminders and notification permission
//! - **/api/settings**: Language and theme
//! - **/api/health**: BMI, vital signs and symptoms
//! - **/api/contacts**: Family and doctor shortcuts

pub mod rest;

pub use rest::*;

//! # Notifications Module
//!
//! Local reminder delivery for medicine alarms.
//!
//! The domain layer only talks to the [`ReminderNotifier`] capability:
//! check or request permission, register a daily reminder, cancel one.
//! [`LocalReminderService`] is the in-process implementation the binary
//! runs with. It keeps registrations in memory and a background tick loop
//! delivers each reminder when its wall-clock time comes around, as a log
//! event and a broadcast message a UI shell can subscribe to.
//!
//! Registrations do not survive a restart; the schedule service
//! re-registers them from the stored schedules at startup.

pub mod local;
pub mod traits;

pub use local::{FiredReminder, LocalReminderService, RegisteredNotification};
pub use traits::ReminderNotifier;

//! Mappers between the public DTOs in `shared` and the domain types

pub mod contact_mapper;
pub mod health_mapper;
pub mod reminder_mapper;
pub mod schedule_mapper;
pub mod settings_mapper;

pub use contact_mapper::ContactMapper;
pub use health_mapper::HealthMapper;
pub use reminder_mapper::ReminderMapper;
pub use schedule_mapper::ScheduleMapper;
pub use settings_mapper::SettingsMapper;

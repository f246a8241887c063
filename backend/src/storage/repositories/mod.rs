pub mod contact_repository;
pub mod health_repository;
pub mod json_collection;
pub mod schedule_repository;
pub mod settings_repository;

pub use contact_repository::ContactRepository;
pub use health_repository::HealthRepository;
pub use json_collection::{CollectionRecord, JsonCollection};
pub use schedule_repository::ScheduleRepository;
pub use settings_repository::SettingsRepository;

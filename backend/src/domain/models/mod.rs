pub mod contact;
pub mod health;
pub mod reminder;
pub mod schedule;
pub mod settings;

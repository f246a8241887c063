//! Domain-level command and result types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod schedules {
    use chrono::NaiveDate;

    use crate::domain::models::reminder::ReminderReport;
    use crate::domain::models::schedule::MedicineSchedule;

    /// Form fields for creating or editing a schedule, with dates already parsed.
    #[derive(Debug, Clone)]
    pub struct ScheduleForm {
        pub medicine_name: String,
        pub medicine_type: String,
        pub medicine_type_other: Option<String>,
        pub disease: String,
        pub disease_other: Option<String>,
        pub medicine_form: String,
        pub dosage_amount: String,
        pub dosage_unit: String,
        pub spoon_size: Option<String>,
        pub notes: Option<String>,
        pub usage_time: String,
        pub times_per_day: i64,
        pub must_finish: bool,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub medicine_image: Option<String>,
        pub doctor_name: Option<String>,
    }

    /// Result of creating or updating a schedule
    #[derive(Debug, Clone)]
    pub struct ScheduleSaveResult {
        pub schedule: MedicineSchedule,
        pub reminders: ReminderReport,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteScheduleResult {
        pub id: String,
        pub reminders_cancelled: usize,
        pub success_message: String,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct ReconcileResult {
        pub schedules_checked: usize,
        pub reminders_registered: usize,
        pub expired_schedules: usize,
    }
}

pub mod settings {
    use crate::domain::models::settings::{DomainLanguage, DomainTheme};

    /// Partial update; None keeps the current value
    #[derive(Debug, Clone, Default)]
    pub struct UpdateSettingsCommand {
        pub language: Option<DomainLanguage>,
        pub theme: Option<DomainTheme>,
    }
}

pub mod health {
    use crate::domain::models::health::DomainSeverity;

    #[derive(Debug, Clone, Default)]
    pub struct RecordVitalSignsCommand {
        pub systolic: Option<u16>,
        pub diastolic: Option<u16>,
        pub heart_rate: Option<u16>,
        pub blood_sugar: Option<f64>,
        pub temperature: Option<f64>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct RecordSymptomCommand {
        pub description: String,
        pub severity: DomainSeverity,
    }
}

pub mod contacts {
    use crate::domain::models::contact::DomainContactRelation;

    #[derive(Debug, Clone)]
    pub struct ContactCommand {
        pub name: String,
        pub phone: String,
        pub relation: DomainContactRelation,
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Medicine schedules
// ---------------------------------------------------------------------------

/// A medicine schedule as exposed over the API.
///
/// Dates are `YYYY-MM-DD`, alarm times are `HH:MM` (24h, local wall clock).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineSchedule {
    /// Schedule ID in format: "schedule::<epoch_millis>::<suffix>"
    pub id: String,
    pub medicine_name: String,
    pub medicine_type: String,
    pub disease: String,
    pub medicine_form: String,
    pub dosage_amount: String,
    pub dosage_unit: String,
    pub spoon_size: Option<String>,
    pub notes: Option<String>,
    /// Free-text instruction, e.g. "after meal"
    pub usage_time: String,
    pub times_per_day: u8,
    pub alarm_times: Vec<String>,
    /// Whether the course must be finished even if symptoms resolve
    pub must_finish: bool,
    pub start_date: String,
    pub end_date: String,
    /// URI of a locally captured or selected photo
    pub medicine_image: Option<String>,
    pub doctor_name: Option<String>,
    /// Number of whole days between start and end date
    pub duration_days: i64,
    /// Number of reminders currently registered for this schedule
    pub reminder_count: usize,
}

/// Form fields submitted when creating or editing a schedule.
///
/// `medicine_type` and `disease` accept the sentinel `"other"`, in which
/// case the matching `*_other` field carries the actual value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleFormRequest {
    pub medicine_name: String,
    pub medicine_type: String,
    #[serde(default)]
    pub medicine_type_other: Option<String>,
    pub disease: String,
    #[serde(default)]
    pub disease_other: Option<String>,
    pub medicine_form: String,
    pub dosage_amount: String,
    pub dosage_unit: String,
    #[serde(default)]
    pub spoon_size: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub usage_time: String,
    /// Checked against 1..=6 by the backend, so out-of-range input is a
    /// validation error rather than a parse error
    pub times_per_day: i64,
    #[serde(default)]
    pub must_finish: bool,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub medicine_image: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
}

/// How reminder registration went for a saved schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    /// Every alarm time has a registered reminder
    Scheduled,
    /// Some alarm times failed to register
    PartiallyScheduled,
    /// Notification permission was not granted; the schedule is saved without reminders
    PermissionDenied,
    /// No reminder could be registered
    Failed,
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReminderStatus::Scheduled => write!(f, "scheduled"),
            ReminderStatus::PartiallyScheduled => write!(f, "partially_scheduled"),
            ReminderStatus::PermissionDenied => write!(f, "permission_denied"),
            ReminderStatus::Failed => write!(f, "failed"),
        }
    }
}

/// An alarm time whose reminder could not be registered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedReminder {
    pub alarm_time: String,
    pub reason: String,
}

/// Response after creating or updating a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSaveResponse {
    pub schedule: MedicineSchedule,
    pub reminder_status: ReminderStatus,
    pub failed_reminders: Vec<FailedReminder>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleListResponse {
    pub schedules: Vec<MedicineSchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteScheduleResponse {
    pub id: String,
    pub reminders_cancelled: usize,
    pub success_message: String,
}

/// Summary of a reminder reconciliation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileRemindersResponse {
    pub schedules_checked: usize,
    pub reminders_registered: usize,
    pub expired_schedules: usize,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetSchedulesResponse {
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Reminders
// ---------------------------------------------------------------------------

/// A reminder currently registered with the notification service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredReminder {
    pub notification_id: String,
    pub medicine_id: String,
    pub title: String,
    pub body: String,
    /// Wall-clock time in `HH:MM`
    pub time: String,
    pub repeats: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderListResponse {
    pub reminders: Vec<RegisteredReminder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    Granted,
    Denied,
    Undetermined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPermissionResponse {
    pub status: NotificationPermission,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNotificationPermissionRequest {
    pub status: NotificationPermission,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Indonesian,
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub language: Language,
    pub theme: Theme,
}

/// Partial settings update; absent fields keep their current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub theme: Option<Theme>,
}

// ---------------------------------------------------------------------------
// Health tracking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResponse {
    pub bmi: f64,
    pub category: BmiCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub id: String,
    /// RFC 3339 timestamp
    pub recorded_at: String,
    pub systolic: Option<u16>,
    pub diastolic: Option<u16>,
    pub heart_rate: Option<u16>,
    /// mg/dL
    pub blood_sugar: Option<f64>,
    /// Celsius
    pub temperature: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordVitalSignsRequest {
    #[serde(default)]
    pub systolic: Option<u16>,
    #[serde(default)]
    pub diastolic: Option<u16>,
    #[serde(default)]
    pub heart_rate: Option<u16>,
    #[serde(default)]
    pub blood_sugar: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSignsListResponse {
    pub entries: Vec<VitalSigns>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomSeverity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub recorded_at: String,
    pub description: String,
    pub severity: SymptomSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSymptomRequest {
    pub description: String,
    pub severity: SymptomSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomListResponse {
    pub entries: Vec<Symptom>,
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRelation {
    Family,
    Doctor,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub relation: ContactRelation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub phone: String,
    pub relation: ContactRelation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactListResponse {
    pub contacts: Vec<Contact>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Body returned with every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Form field that failed validation, when the error is a validation error
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
        }
    }

    pub fn for_field(error: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_request_optional_fields_default() {
        let json = r#"{
            "medicine_name": "Paracetamol",
            "medicine_type": "tablet",
            "disease": "fever",
            "medicine_form": "pill",
            "dosage_amount": "500",
            "dosage_unit": "mg",
            "usage_time": "after meal",
            "times_per_day": 3,
            "start_date": "2024-01-01",
            "end_date": "2024-01-08"
        }"#;

        let request: ScheduleFormRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.medicine_type_other, None);
        assert_eq!(request.spoon_size, None);
        assert!(!request.must_finish);
    }

    #[test]
    fn test_enums_use_snake_case() {
        assert_eq!(
            serde_json::to_string(&ReminderStatus::PartiallyScheduled).unwrap(),
            "\"partially_scheduled\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationPermission::Undetermined).unwrap(),
            "\"undetermined\""
        );
        assert_eq!(ReminderStatus::PermissionDenied.to_string(), "permission_denied");
    }
}

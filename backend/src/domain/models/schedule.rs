use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel accepted for medicine type and disease; the real value then
/// comes from the matching free-text override field.
pub const OTHER_OPTION: &str = "other";

/// Smallest and largest supported doses per day
pub const MIN_TIMES_PER_DAY: u8 = 1;
pub const MAX_TIMES_PER_DAY: u8 = 6;

/// A wall-clock time of day at which a reminder fires, stored as `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlarmTime {
    hour: u8,
    minute: u8,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlarmTimeError {
    #[error("Invalid alarm time '{0}', expected HH:MM")]
    Malformed(String),
    #[error("Alarm time {hour}:{minute} is out of range")]
    OutOfRange { hour: u32, minute: u32 },
}

impl AlarmTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, AlarmTimeError> {
        if hour > 23 || minute > 59 {
            return Err(AlarmTimeError::OutOfRange { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// On-the-hour time, with `hours` wrapped past midnight (26 -> 02:00)
    pub fn from_hours_wrapping(hours: u32) -> Self {
        Self {
            hour: (hours % 24) as u8,
            minute: 0,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for AlarmTime {
    type Err = AlarmTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| AlarmTimeError::Malformed(s.to_string()))?;
        let hour = hour
            .parse::<u32>()
            .map_err(|_| AlarmTimeError::Malformed(s.to_string()))?;
        let minute = minute
            .parse::<u32>()
            .map_err(|_| AlarmTimeError::Malformed(s.to_string()))?;
        AlarmTime::new(hour, minute)
    }
}

impl TryFrom<String> for AlarmTime {
    type Error = AlarmTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AlarmTime> for String {
    fn from(time: AlarmTime) -> Self {
        time.to_string()
    }
}

/// One prescribed medicine regimen.
///
/// Persisted as an element of the JSON array under the `medicineSchedules`
/// key, with camelCase field names and ISO-8601 dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineSchedule {
    pub id: String,
    pub medicine_name: String,
    pub medicine_type: String,
    pub disease: String,
    pub medicine_form: String,
    pub dosage_amount: String,
    pub dosage_unit: String,
    #[serde(default)]
    pub spoon_size: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub usage_time: String,
    pub times_per_day: u8,
    pub alarm_times: Vec<AlarmTime>,
    pub must_finish: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub medicine_image: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    /// Reminders registered for this schedule, so they can be cancelled on edit or delete
    #[serde(default)]
    pub notification_ids: Vec<String>,
}

impl MedicineSchedule {
    /// Build a schedule id from the creation time plus a short random suffix.
    /// Ids sort by creation time; the suffix keeps two schedules created in
    /// the same millisecond apart.
    pub fn generate_id(now_millis: u64) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("schedule::{}::{}", now_millis, &suffix[..8])
    }

    /// Whole days between start and end date
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Reminders are only kept for schedules that have not ended yet
    pub fn is_current_on(&self, date: NaiveDate) -> bool {
        self.end_date >= date
    }

    /// "500 mg", or just the amount when no unit was given
    pub fn dosage_label(&self) -> String {
        let unit = self.dosage_unit.trim();
        if unit.is_empty() {
            self.dosage_amount.clone()
        } else {
            format!("{} {}", self.dosage_amount, unit)
        }
    }
}

/// Validation failures for the schedule form.
///
/// Only the first failing field is reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleValidationError {
    #[error("Medicine name cannot be empty")]
    EmptyMedicineName,
    #[error("Medicine type cannot be empty")]
    EmptyMedicineType,
    #[error("Please describe the medicine type when choosing 'other'")]
    EmptyMedicineTypeOther,
    #[error("Disease cannot be empty")]
    EmptyDisease,
    #[error("Please describe the disease when choosing 'other'")]
    EmptyDiseaseOther,
    #[error("Medicine form cannot be empty")]
    EmptyMedicineForm,
    #[error("Dosage amount cannot be empty")]
    EmptyDosageAmount,
    #[error("Usage time cannot be empty")]
    EmptyUsageTime,
    #[error("Times per day must be between 1 and 6, got {0}")]
    TimesPerDayOutOfRange(i64),
    #[error("End date ({end}) must be after start date ({start})")]
    EndDateNotAfterStartDate { start: NaiveDate, end: NaiveDate },
    #[error("Invalid date '{value}' for {field}, expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
}

impl ScheduleValidationError {
    /// Name of the form field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyMedicineName => "medicine_name",
            Self::EmptyMedicineType => "medicine_type",
            Self::EmptyMedicineTypeOther => "medicine_type_other",
            Self::EmptyDisease => "disease",
            Self::EmptyDiseaseOther => "disease_other",
            Self::EmptyMedicineForm => "medicine_form",
            Self::EmptyDosageAmount => "dosage_amount",
            Self::EmptyUsageTime => "usage_time",
            Self::TimesPerDayOutOfRange(_) => "times_per_day",
            Self::EndDateNotAfterStartDate { .. } => "end_date",
            Self::InvalidDate { field, .. } => *field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_alarm_time_parse_and_display() {
        let time: AlarmTime = "8:05".parse().unwrap();
        assert_eq!(time.hour(), 8);
        assert_eq!(time.minute(), 5);
        assert_eq!(time.to_string(), "08:05");

        assert!(matches!("24:00".parse::<AlarmTime>(), Err(AlarmTimeError::OutOfRange { .. })));
        assert!(matches!("noon".parse::<AlarmTime>(), Err(AlarmTimeError::Malformed(_))));
        assert!(matches!("12:xx".parse::<AlarmTime>(), Err(AlarmTimeError::Malformed(_))));
    }

    #[test]
    fn test_alarm_time_serializes_as_string() {
        let time = AlarmTime::new(16, 0).unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"16:00\"");

        let parsed: AlarmTime = serde_json::from_str("\"12:00\"").unwrap();
        assert_eq!(parsed, AlarmTime::new(12, 0).unwrap());
        assert!(serde_json::from_str::<AlarmTime>("\"25:00\"").is_err());
    }

    #[test]
    fn test_generate_id_format() {
        let id = MedicineSchedule::generate_id(1_704_067_200_000);
        assert!(id.starts_with("schedule::1704067200000::"));
        assert_eq!(id.len(), "schedule::1704067200000::".len() + 8);
        assert_ne!(id, MedicineSchedule::generate_id(1_704_067_200_000));
    }

    #[test]
    fn test_schedule_json_shape() {
        let schedule = MedicineSchedule {
            id: "schedule::1::abcd1234".to_string(),
            medicine_name: "Amlodipine".to_string(),
            medicine_type: "hypertension".to_string(),
            disease: "high blood pressure".to_string(),
            medicine_form: "tablet".to_string(),
            dosage_amount: "5".to_string(),
            dosage_unit: "mg".to_string(),
            spoon_size: None,
            notes: None,
            usage_time: "morning".to_string(),
            times_per_day: 1,
            alarm_times: vec![AlarmTime::new(8, 0).unwrap()],
            must_finish: false,
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 31),
            medicine_image: None,
            doctor_name: Some("Dr. Sari".to_string()),
            notification_ids: vec![],
        };

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["medicineName"], "Amlodipine");
        assert_eq!(json["startDate"], "2024-03-01");
        assert_eq!(json["alarmTimes"][0], "08:00");
        assert_eq!(json["timesPerDay"], 1);
        assert_eq!(schedule.duration_days(), 30);
        assert_eq!(schedule.dosage_label(), "5 mg");
    }

    #[test]
    fn test_legacy_records_without_notification_ids() {
        let json = r#"{
            "id": "schedule::1",
            "medicineName": "Metformin",
            "medicineType": "diabetes",
            "disease": "diabetes",
            "medicineForm": "tablet",
            "dosageAmount": "500",
            "dosageUnit": "mg",
            "usageTime": "after meal",
            "timesPerDay": 2,
            "alarmTimes": ["08:00", "12:00"],
            "mustFinish": true,
            "startDate": "2024-01-01",
            "endDate": "2024-02-01"
        }"#;

        let schedule: MedicineSchedule = serde_json::from_str(json).unwrap();
        assert!(schedule.notification_ids.is_empty());
        assert_eq!(schedule.spoon_size, None);
        assert!(schedule.is_current_on(date(2024, 2, 1)));
        assert!(!schedule.is_current_on(date(2024, 2, 2)));
    }

    #[test]
    fn test_validation_error_fields() {
        assert_eq!(ScheduleValidationError::EmptyMedicineName.field(), "medicine_name");
        assert_eq!(ScheduleValidationError::TimesPerDayOutOfRange(7).field(), "times_per_day");
        let err = ScheduleValidationError::InvalidDate {
            field: "start_date",
            value: "2024-13-01".to_string(),
        };
        assert_eq!(err.field(), "start_date");
    }
}

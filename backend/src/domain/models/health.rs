use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// WHO adult BMI bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainBmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl DomainBmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            DomainBmiCategory::Underweight
        } else if bmi < 25.0 {
            DomainBmiCategory::Normal
        } else if bmi < 30.0 {
            DomainBmiCategory::Overweight
        } else {
            DomainBmiCategory::Obese
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiResult {
    /// Rounded to one decimal place
    pub bmi: f64,
    pub category: DomainBmiCategory,
}

/// One self-measured set of vitals. At least one measurement is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSignsEntry {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainSeverity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub description: String,
    pub severity: DomainSeverity,
}

/// Id for a health log entry, e.g. "vitals::1704067200000::1a2b3c4d"
pub fn generate_entry_id(prefix: &str, now_millis: u64) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}::{}::{}", prefix, now_millis, &suffix[..8])
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HealthValidationError {
    #[error("Weight must be a positive number of kilograms")]
    InvalidWeight,
    #[error("Height must be a positive number of centimetres")]
    InvalidHeight,
    #[error("Record at least one measurement")]
    NoMeasurements,
    #[error("Blood pressure needs both systolic and diastolic values")]
    IncompleteBloodPressure,
    #[error("Systolic pressure ({systolic}) must be higher than diastolic ({diastolic})")]
    SystolicNotAboveDiastolic { systolic: u16, diastolic: u16 },
    #[error("{0} must be a positive number")]
    NonPositiveMeasurement(&'static str),
    #[error("Symptom description cannot be empty")]
    EmptySymptomDescription,
}

impl HealthValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidWeight => "weight_kg",
            Self::InvalidHeight => "height_cm",
            Self::NoMeasurements => "measurements",
            Self::IncompleteBloodPressure | Self::SystolicNotAboveDiastolic { .. } => "systolic",
            Self::NonPositiveMeasurement(field) => *field,
            Self::EmptySymptomDescription => "description",
        }
    }
}

//! Health self-tracking: BMI calculator, vital signs log and symptom log.
//!
//! ## Business Rules
//!
//! - BMI needs a positive weight (kg) and height (cm); the result is
//!   rounded to one decimal and banded with the WHO adult cut-offs
//! - A vital signs entry records at least one measurement
//! - Blood pressure is systolic and diastolic together, systolic higher
//! - Symptoms need a description
//! - Logs are listed newest first

use chrono::Utc;
use tracing::info;

use crate::domain::commands::health::{RecordSymptomCommand, RecordVitalSignsCommand};
use crate::domain::models::health::{
    generate_entry_id, BmiResult, DomainBmiCategory, HealthValidationError, SymptomEntry,
    VitalSignsEntry,
};
use crate::storage::{HealthRepository, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error(transparent)]
    Validation(#[from] HealthValidationError),
    #[error("Health entry not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct HealthService {
    repository: HealthRepository,
}

impl HealthService {
    pub fn new(repository: HealthRepository) -> Self {
        Self { repository }
    }

    pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<BmiResult, HealthValidationError> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(HealthValidationError::InvalidWeight);
        }
        if !height_cm.is_finite() || height_cm <= 0.0 {
            return Err(HealthValidationError::InvalidHeight);
        }

        let height_m = height_cm / 100.0;
        let bmi = (weight_kg / (height_m * height_m) * 10.0).round() / 10.0;

        Ok(BmiResult {
            bmi,
            category: DomainBmiCategory::from_bmi(bmi),
        })
    }

    pub async fn record_vitals(&self, command: RecordVitalSignsCommand) -> Result<VitalSignsEntry, HealthError> {
        Self::validate_vitals(&command)?;

        let now = Utc::now();
        let entry = VitalSignsEntry {
            id: generate_entry_id("vitals", now.timestamp_millis() as u64),
            recorded_at: now,
            systolic: command.systolic,
            diastolic: command.diastolic,
            heart_rate: command.heart_rate,
            blood_sugar: command.blood_sugar,
            temperature: command.temperature,
            notes: command
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        };

        self.repository.store_vitals(&entry).await?;
        info!("Recorded vital signs {}", entry.id);
        Ok(entry)
    }

    pub async fn list_vitals(&self) -> Result<Vec<VitalSignsEntry>, HealthError> {
        Ok(self.repository.list_vitals().await?)
    }

    pub async fn delete_vitals(&self, id: &str) -> Result<(), HealthError> {
        if !self.repository.delete_vitals(id).await? {
            return Err(HealthError::NotFound(id.to_string()));
        }
        info!("Deleted vital signs {}", id);
        Ok(())
    }

    pub async fn record_symptom(&self, command: RecordSymptomCommand) -> Result<SymptomEntry, HealthError> {
        let description = command.description.trim();
        if description.is_empty() {
            return Err(HealthValidationError::EmptySymptomDescription.into());
        }

        let now = Utc::now();
        let entry = SymptomEntry {
            id: generate_entry_id("symptom", now.timestamp_millis() as u64),
            recorded_at: now,
            description: description.to_string(),
            severity: command.severity,
        };

        self.repository.store_symptom(&entry).await?;
        info!("Recorded symptom {} ({:?})", entry.id, entry.severity);
        Ok(entry)
    }

    pub async fn list_symptoms(&self) -> Result<Vec<SymptomEntry>, HealthError> {
        Ok(self.repository.list_symptoms().await?)
    }

    pub async fn delete_symptom(&self, id: &str) -> Result<(), HealthError> {
        if !self.repository.delete_symptom(id).await? {
            return Err(HealthError::NotFound(id.to_string()));
        }
        info!("Deleted symptom {}", id);
        Ok(())
    }

    fn validate_vitals(command: &RecordVitalSignsCommand) -> Result<(), HealthValidationError> {
        let has_measurement = command.systolic.is_some()
            || command.diastolic.is_some()
            || command.heart_rate.is_some()
            || command.blood_sugar.is_some()
            || command.temperature.is_some();
        if !has_measurement {
            return Err(HealthValidationError::NoMeasurements);
        }

        match (command.systolic, command.diastolic) {
            (Some(systolic), Some(diastolic)) if systolic <= diastolic => {
                return Err(HealthValidationError::SystolicNotAboveDiastolic { systolic, diastolic });
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(HealthValidationError::IncompleteBloodPressure);
            }
            _ => {}
        }

        if command.heart_rate == Some(0) {
            return Err(HealthValidationError::NonPositiveMeasurement("heart_rate"));
        }
        if command.blood_sugar.is_some_and(|v| !v.is_finite() || v <= 0.0) {
            return Err(HealthValidationError::NonPositiveMeasurement("blood_sugar"));
        }
        if command.temperature.is_some_and(|v| !v.is_finite() || v <= 0.0) {
            return Err(HealthValidationError::NonPositiveMeasurement("temperature"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::health::DomainSeverity;
    use crate::test_utils::memory_store;

    fn setup() -> HealthService {
        HealthService::new(HealthRepository::new(memory_store()))
    }

    #[test]
    fn test_bmi_bands() {
        let normal = HealthService::calculate_bmi(70.0, 175.0).unwrap();
        assert_eq!(normal.bmi, 22.9);
        assert_eq!(normal.category, DomainBmiCategory::Normal);

        assert_eq!(
            HealthService::calculate_bmi(50.0, 170.0).unwrap().category,
            DomainBmiCategory::Underweight
        );
        assert_eq!(
            HealthService::calculate_bmi(80.0, 170.0).unwrap().category,
            DomainBmiCategory::Overweight
        );
        assert_eq!(
            HealthService::calculate_bmi(95.0, 165.0).unwrap().category,
            DomainBmiCategory::Obese
        );
    }

    #[test]
    fn test_bmi_rejects_non_positive_input() {
        assert_eq!(
            HealthService::calculate_bmi(0.0, 170.0).unwrap_err(),
            HealthValidationError::InvalidWeight
        );
        assert_eq!(
            HealthService::calculate_bmi(60.0, -1.0).unwrap_err(),
            HealthValidationError::InvalidHeight
        );
        assert_eq!(
            HealthService::calculate_bmi(f64::NAN, 170.0).unwrap_err(),
            HealthValidationError::InvalidWeight
        );
    }

    #[tokio::test]
    async fn test_record_and_list_vitals() {
        let service = setup();
        let entry = service
            .record_vitals(RecordVitalSignsCommand {
                systolic: Some(130),
                diastolic: Some(85),
                heart_rate: Some(72),
                notes: Some("  after walk ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(entry.id.starts_with("vitals::"));
        assert_eq!(entry.notes.as_deref(), Some("after walk"));
        assert_eq!(service.list_vitals().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn test_vitals_validation() {
        let service = setup();

        let err = service.record_vitals(RecordVitalSignsCommand::default()).await.unwrap_err();
        assert!(matches!(err, HealthError::Validation(HealthValidationError::NoMeasurements)));

        let err = service
            .record_vitals(RecordVitalSignsCommand {
                systolic: Some(120),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, HealthError::Validation(HealthValidationError::IncompleteBloodPressure)));

        let err = service
            .record_vitals(RecordVitalSignsCommand {
                systolic: Some(80),
                diastolic: Some(120),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HealthError::Validation(HealthValidationError::SystolicNotAboveDiastolic { .. })
        ));

        let err = service
            .record_vitals(RecordVitalSignsCommand {
                temperature: Some(-2.0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HealthError::Validation(HealthValidationError::NonPositiveMeasurement("temperature"))
        ));

        assert!(service.list_vitals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_symptoms_record_and_delete() {
        let service = setup();

        let err = service
            .record_symptom(RecordSymptomCommand {
                description: "   ".to_string(),
                severity: DomainSeverity::Mild,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, HealthError::Validation(HealthValidationError::EmptySymptomDescription)));

        let entry = service
            .record_symptom(RecordSymptomCommand {
                description: "Dizzy in the morning".to_string(),
                severity: DomainSeverity::Moderate,
            })
            .await
            .unwrap();
        assert_eq!(service.list_symptoms().await.unwrap().len(), 1);

        service.delete_symptom(&entry.id).await.unwrap();
        assert!(service.list_symptoms().await.unwrap().is_empty());
        assert!(matches!(
            service.delete_symptom(&entry.id).await,
            Err(HealthError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_vitals_is_not_found() {
        let service = setup();
        assert!(matches!(
            service.delete_vitals("vitals::missing").await,
            Err(HealthError::NotFound(id)) if id == "vitals::missing"
        ));
    }
}

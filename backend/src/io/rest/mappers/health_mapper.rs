use shared::{
    BmiCategory, BmiResponse, RecordSymptomRequest, RecordVitalSignsRequest, Symptom,
    SymptomListResponse, SymptomSeverity, VitalSigns, VitalSignsListResponse,
};

use crate::domain::commands::health::{RecordSymptomCommand, RecordVitalSignsCommand};
use crate::domain::models::health::{
    BmiResult, DomainBmiCategory, DomainSeverity, SymptomEntry, VitalSignsEntry,
};

pub struct HealthMapper;

impl HealthMapper {
    pub fn to_bmi_dto(result: BmiResult) -> BmiResponse {
        BmiResponse {
            bmi: result.bmi,
            category: match result.category {
                DomainBmiCategory::Underweight => BmiCategory::Underweight,
                DomainBmiCategory::Normal => BmiCategory::Normal,
                DomainBmiCategory::Overweight => BmiCategory::Overweight,
                DomainBmiCategory::Obese => BmiCategory::Obese,
            },
        }
    }

    pub fn to_vitals_command(dto: RecordVitalSignsRequest) -> RecordVitalSignsCommand {
        RecordVitalSignsCommand {
            systolic: dto.systolic,
            diastolic: dto.diastolic,
            heart_rate: dto.heart_rate,
            blood_sugar: dto.blood_sugar,
            temperature: dto.temperature,
            notes: dto.notes,
        }
    }

    pub fn to_vitals_dto(domain: VitalSignsEntry) -> VitalSigns {
        VitalSigns {
            id: domain.id,
            recorded_at: domain.recorded_at.to_rfc3339(),
            systolic: domain.systolic,
            diastolic: domain.diastolic,
            heart_rate: domain.heart_rate,
            blood_sugar: domain.blood_sugar,
            temperature: domain.temperature,
            notes: domain.notes,
        }
    }

    pub fn to_vitals_list_dto(entries: Vec<VitalSignsEntry>) -> VitalSignsListResponse {
        VitalSignsListResponse {
            entries: entries.into_iter().map(Self::to_vitals_dto).collect(),
        }
    }

    pub fn to_symptom_command(dto: RecordSymptomRequest) -> RecordSymptomCommand {
        RecordSymptomCommand {
            description: dto.description,
            severity: match dto.severity {
                SymptomSeverity::Mild => DomainSeverity::Mild,
                SymptomSeverity::Moderate => DomainSeverity::Moderate,
                SymptomSeverity::Severe => DomainSeverity::Severe,
            },
        }
    }

    pub fn to_symptom_dto(domain: SymptomEntry) -> Symptom {
        Symptom {
            id: domain.id,
            recorded_at: domain.recorded_at.to_rfc3339(),
            description: domain.description,
            severity: match domain.severity {
                DomainSeverity::Mild => SymptomSeverity::Mild,
                DomainSeverity::Moderate => SymptomSeverity::Moderate,
                DomainSeverity::Severe => SymptomSeverity::Severe,
            },
        }
    }

    pub fn to_symptom_list_dto(entries: Vec<SymptomEntry>) -> SymptomListResponse {
        SymptomListResponse {
            entries: entries.into_iter().map(Self::to_symptom_dto).collect(),
        }
    }
}

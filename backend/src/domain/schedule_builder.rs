//! Schedule builder: turns the medicine form into a complete schedule.
//!
//! ## Business Rules
//!
//! - Name, type, disease, form, dosage amount and usage time are required
//! - Type and disease may be "other", in which case the override text is required
//! - 1 to 6 doses per day
//! - The end date must be strictly after the start date
//! - Alarm times are derived from the dose count: 08:00, then every 4 hours
//!
//! Checks run in that order and stop at the first failure.

use crate::domain::commands::schedules::ScheduleForm;
use crate::domain::models::schedule::{
    AlarmTime, MedicineSchedule, ScheduleValidationError, MAX_TIMES_PER_DAY, MIN_TIMES_PER_DAY,
    OTHER_OPTION,
};

/// Hour of the first dose of the day
pub const FIRST_ALARM_HOUR: u32 = 8;
/// Hours between two doses
pub const ALARM_SPACING_HOURS: u32 = 4;

pub struct ScheduleBuilder;

impl ScheduleBuilder {
    /// Validate `form` and assemble the schedule stored under `id`.
    ///
    /// Has no side effects; persisting the result is up to the caller.
    pub fn build(form: ScheduleForm, id: String) -> Result<MedicineSchedule, ScheduleValidationError> {
        let medicine_name = required(&form.medicine_name, ScheduleValidationError::EmptyMedicineName)?;
        let medicine_type = resolve_option(
            &form.medicine_type,
            form.medicine_type_other.as_deref(),
            ScheduleValidationError::EmptyMedicineType,
            ScheduleValidationError::EmptyMedicineTypeOther,
        )?;
        let disease = resolve_option(
            &form.disease,
            form.disease_other.as_deref(),
            ScheduleValidationError::EmptyDisease,
            ScheduleValidationError::EmptyDiseaseOther,
        )?;
        let medicine_form = required(&form.medicine_form, ScheduleValidationError::EmptyMedicineForm)?;
        let dosage_amount = required(&form.dosage_amount, ScheduleValidationError::EmptyDosageAmount)?;
        let usage_time = required(&form.usage_time, ScheduleValidationError::EmptyUsageTime)?;

        let times_per_day = u8::try_from(form.times_per_day)
            .ok()
            .filter(|n| (MIN_TIMES_PER_DAY..=MAX_TIMES_PER_DAY).contains(n))
            .ok_or(ScheduleValidationError::TimesPerDayOutOfRange(form.times_per_day))?;

        if form.end_date <= form.start_date {
            return Err(ScheduleValidationError::EndDateNotAfterStartDate {
                start: form.start_date,
                end: form.end_date,
            });
        }

        Ok(MedicineSchedule {
            id,
            medicine_name,
            medicine_type,
            disease,
            medicine_form,
            dosage_amount,
            dosage_unit: form.dosage_unit.trim().to_string(),
            spoon_size: optional(form.spoon_size),
            notes: optional(form.notes),
            usage_time,
            times_per_day,
            alarm_times: Self::derive_alarm_times(times_per_day),
            must_finish: form.must_finish,
            start_date: form.start_date,
            end_date: form.end_date,
            medicine_image: optional(form.medicine_image),
            doctor_name: optional(form.doctor_name),
            notification_ids: Vec::new(),
        })
    }

    /// `times_per_day` alarm times from 08:00, 4 hours apart.
    ///
    /// Hours past midnight wrap around: five doses end at 00:00, six at 04:00.
    pub fn derive_alarm_times(times_per_day: u8) -> Vec<AlarmTime> {
        (0..u32::from(times_per_day))
            .map(|i| AlarmTime::from_hours_wrapping(FIRST_ALARM_HOUR + i * ALARM_SPACING_HOURS))
            .collect()
    }
}

fn required(value: &str, error: ScheduleValidationError) -> Result<String, ScheduleValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_string())
}

/// A category field that may be the "other" sentinel plus free text
fn resolve_option(
    value: &str,
    other: Option<&str>,
    empty: ScheduleValidationError,
    empty_other: ScheduleValidationError,
) -> Result<String, ScheduleValidationError> {
    let value = required(value, empty)?;
    if value.eq_ignore_ascii_case(OTHER_OPTION) {
        return required(other.unwrap_or(""), empty_other);
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paracetamol_form() -> ScheduleForm {
        ScheduleForm {
            medicine_name: "Paracetamol".to_string(),
            medicine_type: "analgesic".to_string(),
            medicine_type_other: None,
            disease: "fever".to_string(),
            disease_other: None,
            medicine_form: "tablet".to_string(),
            dosage_amount: "500".to_string(),
            dosage_unit: "mg".to_string(),
            spoon_size: None,
            notes: None,
            usage_time: "after meal".to_string(),
            times_per_day: 3,
            must_finish: false,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 8),
            medicine_image: None,
            doctor_name: None,
        }
    }

    fn times(list: &[&str]) -> Vec<AlarmTime> {
        list.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_build_paracetamol_scenario() {
        let schedule = ScheduleBuilder::build(paracetamol_form(), "schedule::1".to_string()).unwrap();

        assert_eq!(schedule.id, "schedule::1");
        assert_eq!(schedule.medicine_name, "Paracetamol");
        assert_eq!(schedule.alarm_times, times(&["08:00", "12:00", "16:00"]));
        assert_eq!(schedule.duration_days(), 7);
        assert!(schedule.notification_ids.is_empty());
    }

    #[test]
    fn test_derive_alarm_times_for_every_count() {
        for n in 1..=6u8 {
            let alarms = ScheduleBuilder::derive_alarm_times(n);
            assert_eq!(alarms.len(), n as usize);
            assert_eq!(alarms[0], AlarmTime::new(8, 0).unwrap());
            for pair in alarms.windows(2) {
                let diff = (u32::from(pair[1].hour()) + 24 - u32::from(pair[0].hour())) % 24;
                assert_eq!(diff, 4, "alarms must be 4 hours apart for n = {}", n);
                assert_eq!(pair[1].minute(), 0);
            }
        }
    }

    #[test]
    fn test_derive_alarm_times_wraps_past_midnight() {
        assert_eq!(
            ScheduleBuilder::derive_alarm_times(6),
            times(&["08:00", "12:00", "16:00", "20:00", "00:00", "04:00"])
        );
    }

    #[test]
    fn test_end_date_must_be_after_start_date() {
        let start = date(2024, 5, 10);
        for offset in [0, 1, 30] {
            let mut form = paracetamol_form();
            form.start_date = start;
            form.end_date = start - Duration::days(offset);

            let err = ScheduleBuilder::build(form, "id".to_string()).unwrap_err();
            assert!(matches!(err, ScheduleValidationError::EndDateNotAfterStartDate { .. }));
            assert_eq!(err.field(), "end_date");
        }

        let mut form = paracetamol_form();
        form.start_date = start;
        form.end_date = start + Duration::days(1);
        assert!(ScheduleBuilder::build(form, "id".to_string()).is_ok());
    }

    #[test]
    fn test_first_failing_field_is_reported() {
        let mut form = paracetamol_form();
        form.medicine_name = "  ".to_string();
        form.dosage_amount = String::new();
        form.end_date = form.start_date;

        let err = ScheduleBuilder::build(form, "id".to_string()).unwrap_err();
        assert_eq!(err, ScheduleValidationError::EmptyMedicineName);
    }

    #[test]
    fn test_each_required_field() {
        let cases: Vec<(fn(&mut ScheduleForm), ScheduleValidationError)> = vec![
            (|f| f.medicine_type.clear(), ScheduleValidationError::EmptyMedicineType),
            (|f| f.disease.clear(), ScheduleValidationError::EmptyDisease),
            (|f| f.medicine_form.clear(), ScheduleValidationError::EmptyMedicineForm),
            (|f| f.dosage_amount.clear(), ScheduleValidationError::EmptyDosageAmount),
            (|f| f.usage_time.clear(), ScheduleValidationError::EmptyUsageTime),
            (|f| f.times_per_day = 0, ScheduleValidationError::TimesPerDayOutOfRange(0)),
            (|f| f.times_per_day = 7, ScheduleValidationError::TimesPerDayOutOfRange(7)),
            (|f| f.times_per_day = 300, ScheduleValidationError::TimesPerDayOutOfRange(300)),
            (|f| f.times_per_day = -1, ScheduleValidationError::TimesPerDayOutOfRange(-1)),
        ];

        for (mutate, expected) in cases {
            let mut form = paracetamol_form();
            mutate(&mut form);
            assert_eq!(ScheduleBuilder::build(form, "id".to_string()).unwrap_err(), expected);
        }
    }

    #[test]
    fn test_other_option_uses_override() {
        let mut form = paracetamol_form();
        form.medicine_type = "Other".to_string();
        form.medicine_type_other = Some(" herbal ".to_string());
        form.disease = "other".to_string();
        form.disease_other = Some("joint pain".to_string());

        let schedule = ScheduleBuilder::build(form, "id".to_string()).unwrap();
        assert_eq!(schedule.medicine_type, "herbal");
        assert_eq!(schedule.disease, "joint pain");
    }

    #[test]
    fn test_other_option_requires_override() {
        let mut form = paracetamol_form();
        form.medicine_type = "other".to_string();
        form.medicine_type_other = Some("   ".to_string());
        assert_eq!(
            ScheduleBuilder::build(form, "id".to_string()).unwrap_err(),
            ScheduleValidationError::EmptyMedicineTypeOther
        );

        let mut form = paracetamol_form();
        form.disease = "other".to_string();
        assert_eq!(
            ScheduleBuilder::build(form, "id".to_string()).unwrap_err(),
            ScheduleValidationError::EmptyDiseaseOther
        );
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let mut form = paracetamol_form();
        form.notes = Some("  ".to_string());
        form.doctor_name = Some(" Dr. Budi ".to_string());
        form.spoon_size = Some(String::new());

        let schedule = ScheduleBuilder::build(form, "id".to_string()).unwrap();
        assert_eq!(schedule.notes, None);
        assert_eq!(schedule.spoon_size, None);
        assert_eq!(schedule.doctor_name.as_deref(), Some("Dr. Budi"));
    }
}

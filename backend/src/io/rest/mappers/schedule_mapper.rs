//! Conversions between the schedule DTOs in `shared` and the domain types.

use chrono::NaiveDate;
use shared::{
    DeleteScheduleResponse, FailedReminder, MedicineSchedule as SharedSchedule,
    ReconcileRemindersResponse, ReminderStatus, ScheduleFormRequest, ScheduleListResponse,
    ScheduleSaveResponse,
};

use crate::domain::commands::schedules::{
    DeleteScheduleResult, ReconcileResult, ScheduleForm, ScheduleSaveResult,
};
use crate::domain::models::reminder::DomainReminderStatus;
use crate::domain::models::schedule::{MedicineSchedule as DomainSchedule, ScheduleValidationError};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct ScheduleMapper;

impl ScheduleMapper {
    /// Parse the submitted form. An unparsable date is a validation error
    /// on that field.
    pub fn to_form(dto: ScheduleFormRequest) -> Result<ScheduleForm, ScheduleValidationError> {
        let start_date = parse_date("start_date", &dto.start_date)?;
        let end_date = parse_date("end_date", &dto.end_date)?;

        Ok(ScheduleForm {
            medicine_name: dto.medicine_name,
            medicine_type: dto.medicine_type,
            medicine_type_other: dto.medicine_type_other,
            disease: dto.disease,
            disease_other: dto.disease_other,
            medicine_form: dto.medicine_form,
            dosage_amount: dto.dosage_amount,
            dosage_unit: dto.dosage_unit,
            spoon_size: dto.spoon_size,
            notes: dto.notes,
            usage_time: dto.usage_time,
            times_per_day: dto.times_per_day,
            must_finish: dto.must_finish,
            start_date,
            end_date,
            medicine_image: dto.medicine_image,
            doctor_name: dto.doctor_name,
        })
    }

    pub fn to_dto(domain: DomainSchedule) -> SharedSchedule {
        SharedSchedule {
            duration_days: domain.duration_days(),
            reminder_count: domain.notification_ids.len(),
            id: domain.id,
            medicine_name: domain.medicine_name,
            medicine_type: domain.medicine_type,
            disease: domain.disease,
            medicine_form: domain.medicine_form,
            dosage_amount: domain.dosage_amount,
            dosage_unit: domain.dosage_unit,
            spoon_size: domain.spoon_size,
            notes: domain.notes,
            usage_time: domain.usage_time,
            times_per_day: domain.times_per_day,
            alarm_times: domain.alarm_times.iter().map(|t| t.to_string()).collect(),
            must_finish: domain.must_finish,
            start_date: domain.start_date.format(DATE_FORMAT).to_string(),
            end_date: domain.end_date.format(DATE_FORMAT).to_string(),
            medicine_image: domain.medicine_image,
            doctor_name: domain.doctor_name,
        }
    }

    pub fn to_list_dto(schedules: Vec<DomainSchedule>) -> ScheduleListResponse {
        ScheduleListResponse {
            schedules: schedules.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_save_response(result: ScheduleSaveResult) -> ScheduleSaveResponse {
        ScheduleSaveResponse {
            reminder_status: Self::to_status_dto(result.reminders.status),
            failed_reminders: result
                .reminders
                .failed
                .into_iter()
                .map(|f| FailedReminder {
                    alarm_time: f.alarm_time.to_string(),
                    reason: f.reason,
                })
                .collect(),
            schedule: Self::to_dto(result.schedule),
            success_message: result.success_message,
        }
    }

    pub fn to_delete_response(result: DeleteScheduleResult) -> DeleteScheduleResponse {
        DeleteScheduleResponse {
            id: result.id,
            reminders_cancelled: result.reminders_cancelled,
            success_message: result.success_message,
        }
    }

    pub fn to_reconcile_response(result: ReconcileResult) -> ReconcileRemindersResponse {
        ReconcileRemindersResponse {
            success_message: format!(
                "{} reminders registered for {} schedules",
                result.reminders_registered,
                result.schedules_checked.saturating_sub(result.expired_schedules)
            ),
            schedules_checked: result.schedules_checked,
            reminders_registered: result.reminders_registered,
            expired_schedules: result.expired_schedules,
        }
    }

    pub fn to_status_dto(status: DomainReminderStatus) -> ReminderStatus {
        match status {
            DomainReminderStatus::Scheduled => ReminderStatus::Scheduled,
            DomainReminderStatus::PartiallyScheduled => ReminderStatus::PartiallyScheduled,
            DomainReminderStatus::PermissionDenied => ReminderStatus::PermissionDenied,
            DomainReminderStatus::Failed => ReminderStatus::Failed,
        }
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ScheduleValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ScheduleValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_schedule;

    fn form_request(start: &str, end: &str) -> ScheduleFormRequest {
        ScheduleFormRequest {
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
            start_date: start.to_string(),
            end_date: end.to_string(),
            medicine_image: None,
            doctor_name: None,
        }
    }

    #[test]
    fn test_form_dates_are_parsed() {
        let form = ScheduleMapper::to_form(form_request("2024-01-01", "2024-01-08")).unwrap();
        assert_eq!(form.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(form.end_date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    }

    #[test]
    fn test_bad_date_names_the_field() {
        let err = ScheduleMapper::to_form(form_request("2024-01-01", "08/01/2024")).unwrap_err();
        assert_eq!(err.field(), "end_date");

        let err = ScheduleMapper::to_form(form_request("2024-02-30", "2024-03-01")).unwrap_err();
        assert_eq!(err.field(), "start_date");
    }

    #[test]
    fn test_dto_carries_derived_fields() {
        let mut schedule = sample_schedule("schedule::1", "Paracetamol");
        schedule.notification_ids = vec!["a".to_string(), "b".to_string()];

        let dto = ScheduleMapper::to_dto(schedule);
        assert_eq!(dto.duration_days, 7);
        assert_eq!(dto.reminder_count, 2);
        assert_eq!(dto.alarm_times, vec!["08:00", "12:00", "16:00"]);
        assert_eq!(dto.start_date, "2024-01-01");
    }
}

//! Appointment DTOs

use crate::core::format;
use crate::entities::{AppointmentRow, AppointmentStatus};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct AppointmentHospitalDTO {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct AppointmentDTO {
    pub id: i32,
    pub date: String,
    pub time: String,
    pub datetime: String,
    pub blood_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub reminder_sent: bool,
    pub created_at: String,
    pub updated_at: String,
    pub hospital: AppointmentHospitalDTO,
    pub formatted_date: String,
    pub formatted_time: String,
    pub is_upcoming: bool,
    pub status_class: &'static str,
}

impl AppointmentDTO {
    pub fn from_row(row: AppointmentRow, now: NaiveDateTime) -> Self {
        let starts_at = row.starts_at();
        let status_class = AppointmentStatus::parse(&row.status)
            .map_or("badge-light", |status| status.badge_class());

        Self {
            id: row.id,
            date: row.appointment_date.format("%Y-%m-%d").to_string(),
            time: row.appointment_time.format("%H:%M:%S").to_string(),
            datetime: format::sql_datetime(starts_at),
            blood_type: row.blood_type,
            status: row.status,
            notes: row.notes,
            contact_person: row.contact_person,
            contact_phone: row.contact_phone,
            reminder_sent: row.reminder_sent,
            created_at: format::sql_datetime(row.created_at),
            updated_at: format::sql_datetime(row.updated_at),
            hospital: AppointmentHospitalDTO {
                id: row.hospital_id,
                name: row.hospital_name,
                address: row.hospital_address,
                city: row.hospital_city,
                phone: row.hospital_phone,
                email: row.hospital_email,
            },
            formatted_date: format::full_date(row.appointment_date),
            formatted_time: format::clock_time(row.appointment_time),
            is_upcoming: starts_at > now,
            status_class,
        }
    }

    /// Upcoming and still open (not completed, cancelled or missed)
    pub fn is_pending(&self) -> bool {
        self.is_upcoming
            && !AppointmentStatus::parse(&self.status).is_some_and(|status| status.is_closed())
    }
}

/// Every appointment of the donor, and the same list split in two
#[derive(Serialize, Debug, Clone, Default)]
pub struct AppointmentsDTO {
    pub all: Vec<AppointmentDTO>,
    pub upcoming: Vec<AppointmentDTO>,
    pub past: Vec<AppointmentDTO>,
}

impl AppointmentsDTO {
    pub fn split(all: Vec<AppointmentDTO>) -> Self {
        let (upcoming, past): (Vec<_>, Vec<_>) = all.iter().cloned().partition(AppointmentDTO::is_pending);
        Self { all, upcoming, past }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppointmentStatsDTO {
    pub total: usize,
    pub upcoming: usize,
    pub past: usize,
    pub completed: usize,
}

impl From<&AppointmentsDTO> for AppointmentStatsDTO {
    fn from(value: &AppointmentsDTO) -> Self {
        Self {
            total: value.all.len(),
            upcoming: value.upcoming.len(),
            past: value.past.len(),
            completed: value
                .all
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed.as_str())
                .count(),
        }
    }
}

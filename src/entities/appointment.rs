//! Appointment entity, joined with its hospital

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppointmentRow {
    pub id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub blood_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub reminder_sent: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub hospital_id: i32,
    pub hospital_name: String,
    pub hospital_address: Option<String>,
    pub hospital_city: Option<String>,
    pub hospital_phone: Option<String>,
    pub hospital_email: Option<String>,
}

impl AppointmentRow {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.appointment_date.and_time(self.appointment_time)
    }
}

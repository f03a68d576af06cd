//! AppointmentRepository - donor appointments

use crate::entities::{AppointmentRow, AppointmentStatus};
use sqlx::{Error, MySql, MySqlPool, QueryBuilder};

pub struct AppointmentRepository {
    connection_pool: MySqlPool,
}

impl AppointmentRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Appointments of a donor with their hospital, latest first
    pub async fn for_donor(
        &self,
        donor_id: i32,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentRow>, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                a.id,
                a.appointment_date,
                a.appointment_time,
                a.blood_type,
                CAST(a.status AS CHAR) AS status,
                a.notes,
                a.contact_person,
                a.contact_phone,
                a.reminder_sent,
                a.created_at,
                a.updated_at,
                h.id AS hospital_id,
                h.hospital_name,
                h.address AS hospital_address,
                h.city AS hospital_city,
                h.contact_phone AS hospital_phone,
                h.contact_email AS hospital_email
             FROM appointments a
             JOIN hospitals h ON a.hospital_id = h.id
             WHERE a.donor_id = ",
        );
        builder.push_bind(donor_id);
        if let Some(status) = status {
            builder.push(" AND a.status = ").push_bind(status.as_str());
        }
        builder.push(" ORDER BY a.appointment_date DESC, a.appointment_time DESC");

        builder
            .build_query_as::<AppointmentRow>()
            .fetch_all(&self.connection_pool)
            .await
    }
}

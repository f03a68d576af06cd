//! Blood request projections

use chrono::NaiveDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmergencyRequestRow {
    pub id: i32,
    pub blood_type: String,
    pub units_needed: i32,
    pub urgency_level: String,
    pub status: String,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub hospital_name: Option<String>,
    pub hospital_address: Option<String>,
}

/// A request as shown in the hospital activity feed
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RequestActivityRow {
    pub id: i32,
    pub activity_date: NaiveDateTime,
    pub blood_type: String,
    pub units_needed: i32,
    pub status: String,
    pub urgency_level: String,
    pub hospital_name: Option<String>,
}

//! User entity and the projections read from the users table

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Identity of an active donor
#[derive(Serialize, Debug, Clone, sqlx::FromRow)]
pub struct Donor {
    pub id: i32,
    pub full_name: String,
}

/// One donor in a search result, with donation aggregates
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DonorSearchRow {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub blood_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_eligible: bool,
    pub last_donation_date: Option<NaiveDate>,
    pub total_donations: i64,
    pub last_donation: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoleCount {
    pub role: String,
    pub count: i64,
}

/// Registrations over the last 30 days
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct RegistrationStats {
    pub recent_registrations: i64,
    pub recent_donors: i64,
    pub recent_hospitals: i64,
}

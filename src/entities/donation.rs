//! Donation projections

use chrono::{NaiveDate, NaiveDateTime};

/// Donations of one blood type on one day
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyDonationCount {
    pub donation_day: NaiveDate,
    pub blood_type: String,
    pub donation_count: i64,
}

/// A donation as shown in the hospital activity feed
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DonationActivityRow {
    pub id: i32,
    pub activity_date: NaiveDateTime,
    pub blood_type: String,
    pub quantity: i32,
    pub status: String,
    pub donor_name: Option<String>,
    pub hospital_name: Option<String>,
}

//! Campaign entity and related projections

use chrono::{NaiveDate, NaiveDateTime};

/// Campaign row joined with its hospital and organizer, as listed to clients
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CampaignListRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub hospital_id: Option<i32>,
    pub organizer_id: Option<i32>,
    pub blood_type: Option<String>,
    pub target_units: i32,
    pub collected_units: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub hospital_name: Option<String>,
    pub city: Option<String>,
    pub organizer_name: Option<String>,
    pub days_remaining: i64,
}

/// Campaign with its originating request, hospital and donation aggregates
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CampaignDetailRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub hospital_id: Option<i32>,
    pub request_id: Option<i32>,
    pub blood_type: Option<String>,
    pub units_needed: i64,
    pub urgency_level: Option<String>,
    pub request_location: Option<String>,
    pub request_description: Option<String>,
    pub hospital_name: Option<String>,
    pub contact_person: Option<String>,
    pub hospital_phone: Option<String>,
    pub hospital_address: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub total_donations: i64,
    pub units_collected: i64,
    pub avg_donation_size: f64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CampaignDonationRow {
    pub id: i32,
    pub donor_id: i32,
    pub blood_type: String,
    pub quantity: i32,
    pub status: String,
    pub donation_date: Option<NaiveDateTime>,
    pub scheduled_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub donor_name: Option<String>,
    pub donor_blood_type: Option<String>,
    pub donor_phone: Option<String>,
}

/// One entry of a campaign timeline (a donation or the last status change)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TimelineRow {
    pub activity_type: String,
    pub activity_date: NaiveDateTime,
    pub activity_description: Option<String>,
    pub activity_status: String,
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct CampaignCounts {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
    pub pending: i64,
    pub total_units_collected: i64,
}

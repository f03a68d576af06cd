//! Hospital activity feed DTOs

use crate::core::format;
use crate::entities::{DonationActivityRow, RequestActivityRow, UrgencyLevel};
use chrono::NaiveDateTime;
use serde::Serialize;

pub const DONATION_ACTIVITY: &str = "donation";
pub const REQUEST_ACTIVITY: &str = "blood_request";

/// One entry of the activity feed, built from a donation or a blood request
#[derive(Serialize, Debug, Clone)]
pub struct ActivityItemDTO {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub description: String,
    pub details: String,
    pub blood_type: String,
    pub quantity: i32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    pub hospital: Option<String>,
    pub activity_date: String,
    pub icon: &'static str,
    pub color: &'static str,
    pub formatted_date: String,
    pub time_ago: String,
    #[serde(skip)]
    pub occurred_at: NaiveDateTime,
}

impl ActivityItemDTO {
    pub fn from_donation(row: DonationActivityRow, now: NaiveDateTime) -> Self {
        let donor = row.donor_name.unwrap_or_else(|| "Unknown donor".to_string());
        Self {
            id: format!("donation_{}", row.id),
            kind: DONATION_ACTIVITY,
            title: "Blood Donation",
            description: format!("{} donated {} blood", donor, row.blood_type),
            details: format!("Quantity: {} units", row.quantity),
            quantity: row.quantity,
            status: row.status,
            participant: Some(donor),
            urgency: None,
            hospital: Some(row.hospital_name.unwrap_or_else(|| "Current Hospital".to_string())),
            icon: "fas fa-tint",
            color: "success",
            blood_type: row.blood_type,
            activity_date: format::sql_datetime(row.activity_date),
            formatted_date: format::padded_datetime(row.activity_date),
            time_ago: format::time_ago_or_date(row.activity_date, now),
            occurred_at: row.activity_date,
        }
    }

    pub fn from_request(row: RequestActivityRow, now: NaiveDateTime) -> Self {
        let hospital = row.hospital_name.as_deref().unwrap_or("A hospital");
        let color = if row.urgency_level == UrgencyLevel::Critical.as_str() {
            "danger"
        } else {
            "warning"
        };
        Self {
            id: format!("request_{}", row.id),
            kind: REQUEST_ACTIVITY,
            title: "Blood Request",
            description: format!("{} requested {} blood", hospital, row.blood_type),
            details: format!(
                "Units needed: {}, Urgency: {}",
                row.units_needed, row.urgency_level
            ),
            quantity: row.units_needed,
            status: row.status,
            participant: None,
            icon: "fas fa-exclamation-triangle",
            color,
            blood_type: row.blood_type,
            urgency: Some(row.urgency_level),
            hospital: row.hospital_name,
            activity_date: format::sql_datetime(row.activity_date),
            formatted_date: format::padded_datetime(row.activity_date),
            time_ago: format::time_ago_or_date(row.activity_date, now),
            occurred_at: row.activity_date,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ActivityStatsDTO {
    pub total_activities: usize,
    pub donations: usize,
    pub requests: usize,
    pub last_updated: String,
}

impl ActivityStatsDTO {
    pub fn new(items: &[ActivityItemDTO], now: NaiveDateTime) -> Self {
        let of_kind = |kind: &str| items.iter().filter(|item| item.kind == kind).count();
        Self {
            total_activities: items.len(),
            donations: of_kind(DONATION_ACTIVITY),
            requests: of_kind(REQUEST_ACTIVITY),
            last_updated: format::sql_datetime(now),
        }
    }
}

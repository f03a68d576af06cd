//! Donor search DTOs

use crate::core::format;
use crate::entities::DonorSearchRow;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Minimum gap between two whole-blood donations
pub const DONATION_INTERVAL_DAYS: i64 = 56;

#[derive(Serialize, Debug, Clone)]
pub struct DonorDTO {
    pub id: i32,
    pub full_name: String,
    /// Masked, e.g. `jan***@example.com`
    pub email: String,
    /// Masked, e.g. `123***890`
    pub phone: Option<String>,
    pub blood_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_eligible: bool,
    pub last_donation_date: Option<String>,
    pub total_donations: i64,
    pub last_donation: Option<String>,
    pub days_since_last_donation: Option<i64>,
    pub eligible_to_donate: bool,
    pub last_donation_formatted: String,
    pub contact_status: &'static str,
}

impl DonorDTO {
    pub fn from_row(row: DonorSearchRow, now: NaiveDateTime) -> Self {
        let days_since_last_donation = row.last_donation.map(|last| (now - last).num_days());
        let eligible_to_donate = row.is_eligible
            && days_since_last_donation.is_none_or(|days| days >= DONATION_INTERVAL_DAYS);
        let phone = row.phone.filter(|phone| !phone.is_empty());

        Self {
            id: row.id,
            full_name: row.full_name,
            email: format::mask_email(&row.email),
            contact_status: if phone.is_some() { "available" } else { "no_phone" },
            phone: phone.as_deref().map(format::mask_phone),
            blood_type: row.blood_type,
            city: row.city,
            state: row.state,
            is_eligible: row.is_eligible,
            last_donation_date: row.last_donation_date.map(|d: NaiveDate| d.format("%Y-%m-%d").to_string()),
            total_donations: row.total_donations,
            last_donation: row.last_donation.map(format::sql_datetime),
            last_donation_formatted: row
                .last_donation
                .map_or_else(|| "Never".to_string(), |last| format::short_date(last.date())),
            days_since_last_donation,
            eligible_to_donate,
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct DonorSearchStatsDTO {
    pub total_found: usize,
    pub eligible_count: usize,
    pub blood_types: BTreeMap<String, usize>,
    pub search_query: String,
    pub blood_type_filter: String,
}

impl DonorSearchStatsDTO {
    pub fn new(donors: &[DonorDTO], search_query: &str, blood_type_filter: &str) -> Self {
        let mut blood_types = BTreeMap::new();
        for blood_type in donors.iter().filter_map(|d| d.blood_type.as_ref()) {
            *blood_types.entry(blood_type.clone()).or_insert(0) += 1;
        }
        Self {
            total_found: donors.len(),
            eligible_count: donors.iter().filter(|d| d.eligible_to_donate).count(),
            blood_types,
            search_query: search_query.to_string(),
            blood_type_filter: blood_type_filter.to_string(),
        }
    }
}

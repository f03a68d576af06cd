//! Emergency request DTOs

use crate::core::format;
use crate::entities::{
    EmergencyRequestRow, RequestStatus, UrgencyLevel,
    enums::{StatusInfo, UrgencyInfo},
};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct EmergencyRequestDTO {
    pub id: i32,
    pub blood_type: String,
    pub units_needed: i32,
    pub urgency_level: String,
    pub status: String,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub hospital_name: Option<String>,
    pub hospital_address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub urgency_info: UrgencyInfo,
    pub status_info: StatusInfo,
    pub created_formatted: String,
    pub time_ago: String,
}

impl EmergencyRequestDTO {
    pub fn from_row(row: EmergencyRequestRow, now: NaiveDateTime) -> Self {
        Self {
            urgency_info: UrgencyLevel::parse(&row.urgency_level).info(),
            status_info: RequestStatus::parse(&row.status).info(),
            created_formatted: format::long_datetime(row.created_at),
            time_ago: format::time_ago(row.created_at, now),
            created_at: format::sql_datetime(row.created_at),
            updated_at: format::sql_datetime(row.updated_at),
            id: row.id,
            blood_type: row.blood_type,
            units_needed: row.units_needed,
            urgency_level: row.urgency_level,
            status: row.status,
            notes: row.notes,
            location: row.location,
            contact_person: row.contact_person,
            phone: row.phone,
            hospital_name: row.hospital_name,
            hospital_address: row.hospital_address,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EmergencyStatsDTO {
    pub total_requests: usize,
    pub emergency_count: usize,
    pub critical_count: usize,
    pub pending_count: usize,
    pub last_updated: String,
}

impl EmergencyStatsDTO {
    pub fn new(requests: &[EmergencyRequestDTO], now: NaiveDateTime) -> Self {
        let with_urgency = |level: UrgencyLevel| {
            requests
                .iter()
                .filter(|r| r.urgency_level == level.as_str())
                .count()
        };
        Self {
            total_requests: requests.len(),
            emergency_count: with_urgency(UrgencyLevel::Emergency),
            critical_count: with_urgency(UrgencyLevel::Critical),
            pending_count: requests.iter().filter(|r| r.status == "pending").count(),
            last_updated: format::sql_datetime(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(id: i32, urgency: &str, status: &str, created_at: NaiveDateTime) -> EmergencyRequestRow {
        EmergencyRequestRow {
            id,
            blood_type: "O-".into(),
            units_needed: 2,
            urgency_level: urgency.into(),
            status: status.into(),
            notes: None,
            location: None,
            contact_person: None,
            phone: None,
            created_at,
            updated_at: created_at,
            hospital_name: None,
            hospital_address: None,
        }
    }

    #[test]
    fn decorates_and_counts_requests() {
        let now = NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let earlier = now - chrono::Duration::minutes(30);
        let requests: Vec<EmergencyRequestDTO> = vec![
            row(1, "emergency", "pending", earlier),
            row(2, "critical", "accepted", earlier),
            row(3, "high", "pending", now),
        ]
        .into_iter()
        .map(|r| EmergencyRequestDTO::from_row(r, now))
        .collect();

        assert_eq!(requests[0].urgency_info.priority, 1);
        assert_eq!(requests[0].time_ago, "30 minutes ago");
        assert_eq!(requests[1].status_info.text, "Accepted");
        assert_eq!(requests[2].time_ago, "just now");

        let stats = EmergencyStatsDTO::new(&requests, now);
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.emergency_count, 1);
        assert_eq!(stats.critical_count, 1);
        assert_eq!(stats.pending_count, 2);
        assert_eq!(stats.last_updated, "2025-05-01 12:00:00");
    }
}

//! Campaign DTOs - list items, details with metrics, and aggregate stats

use crate::core::format;
use crate::entities::{
    CampaignCounts, CampaignDetailRow, CampaignDonationRow, CampaignListRow, TimelineRow,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Lifecycle phase of a campaign relative to `today`
pub fn campaign_phase(today: NaiveDate, start: NaiveDate, end: NaiveDate) -> &'static str {
    if today < start {
        "upcoming"
    } else if today > end {
        "completed"
    } else {
        "active"
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CampaignDTO {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub hospital_id: Option<i32>,
    pub organizer_id: Option<i32>,
    pub blood_type: Option<String>,
    pub target_units: i32,
    pub collected_units: i32,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub created_at: String,
    pub hospital_name: Option<String>,
    pub city: Option<String>,
    pub organizer_name: Option<String>,
    pub days_remaining: i64,
    pub progress_percentage: f64,
    pub status: &'static str,
}

impl CampaignDTO {
    pub fn from_row(row: CampaignListRow, today: NaiveDate) -> Self {
        let progress_percentage = if row.target_units > 0 {
            (f64::from(row.collected_units) / f64::from(row.target_units) * 100.0).min(100.0)
        } else {
            0.0
        };

        Self {
            status: campaign_phase(today, row.start_date, row.end_date),
            start_date: format::padded_date(row.start_date),
            end_date: format::padded_date(row.end_date),
            created_at: format::padded_datetime(row.created_at),
            progress_percentage,
            id: row.id,
            title: row.title,
            description: row.description,
            hospital_id: row.hospital_id,
            organizer_id: row.organizer_id,
            blood_type: row.blood_type,
            target_units: row.target_units,
            collected_units: row.collected_units,
            is_active: row.is_active,
            hospital_name: row.hospital_name,
            city: row.city,
            organizer_name: row.organizer_name,
            days_remaining: row.days_remaining,
        }
    }
}

// ************************* DETAILS ************************* //

#[derive(Serialize, Debug, Clone)]
pub struct CampaignDetailDTO {
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
    pub start_date: String,
    pub end_date: String,
    pub created_at: String,
    pub updated_at: String,
    pub total_donations: i64,
    pub units_collected: i64,
    pub avg_donation_size: f64,
    pub created_formatted: String,
    pub updated_formatted: String,
    pub end_formatted: String,
}

impl From<CampaignDetailRow> for CampaignDetailDTO {
    fn from(row: CampaignDetailRow) -> Self {
        Self {
            created_formatted: format::long_datetime(row.created_at),
            updated_formatted: format::long_datetime(row.updated_at),
            end_formatted: format::short_date(row.end_date),
            start_date: row.start_date.format("%Y-%m-%d").to_string(),
            end_date: row.end_date.format("%Y-%m-%d").to_string(),
            created_at: format::sql_datetime(row.created_at),
            updated_at: format::sql_datetime(row.updated_at),
            avg_donation_size: format::round1(row.avg_donation_size),
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            hospital_id: row.hospital_id,
            request_id: row.request_id,
            blood_type: row.blood_type,
            units_needed: row.units_needed,
            urgency_level: row.urgency_level,
            request_location: row.request_location,
            request_description: row.request_description,
            hospital_name: row.hospital_name,
            contact_person: row.contact_person,
            hospital_phone: row.hospital_phone,
            hospital_address: row.hospital_address,
            total_donations: row.total_donations,
            units_collected: row.units_collected,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CampaignDonationDTO {
    pub id: i32,
    pub donor_id: i32,
    pub blood_type: String,
    pub quantity: i32,
    pub status: String,
    pub donation_date: Option<String>,
    pub scheduled_date: Option<String>,
    pub created_at: String,
    pub donor_name: Option<String>,
    pub donor_blood_type: Option<String>,
    pub donor_phone: Option<String>,
    pub created_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_formatted: Option<String>,
}

impl From<CampaignDonationRow> for CampaignDonationDTO {
    fn from(row: CampaignDonationRow) -> Self {
        Self {
            created_formatted: format::long_datetime(row.created_at),
            scheduled_formatted: row.scheduled_date.map(format::long_datetime),
            donation_date: row.donation_date.map(format::sql_datetime),
            scheduled_date: row.scheduled_date.map(format::sql_datetime),
            created_at: format::sql_datetime(row.created_at),
            id: row.id,
            donor_id: row.donor_id,
            blood_type: row.blood_type,
            quantity: row.quantity,
            status: row.status,
            donor_name: row.donor_name,
            donor_blood_type: row.donor_blood_type,
            donor_phone: row.donor_phone,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TimelineEntryDTO {
    pub activity_type: String,
    pub activity_date: String,
    pub activity_description: Option<String>,
    pub activity_status: String,
    pub activity_formatted: String,
}

impl From<TimelineRow> for TimelineEntryDTO {
    fn from(row: TimelineRow) -> Self {
        Self {
            activity_formatted: format::long_datetime(row.activity_date),
            activity_date: format::sql_datetime(row.activity_date),
            activity_type: row.activity_type,
            activity_description: row.activity_description,
            activity_status: row.activity_status,
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct CampaignMetricsDTO {
    pub progress_percentage: f64,
    pub completion_rate: f64,
    pub days_active: i64,
    pub avg_daily_donations: f64,
}

impl CampaignMetricsDTO {
    pub fn compute(
        campaign: &CampaignDetailRow,
        completed_donations: usize,
        now: NaiveDateTime,
    ) -> Self {
        let progress_percentage = if campaign.units_needed > 0 {
            format::round1(
                campaign.units_collected as f64 / campaign.units_needed as f64 * 100.0,
            )
            .min(100.0)
        } else {
            0.0
        };
        let completion_rate = if campaign.total_donations > 0 {
            format::round1(completed_donations as f64 / campaign.total_donations as f64 * 100.0)
        } else {
            0.0
        };
        let days_active = (now - campaign.created_at).num_days().max(0);
        let avg_daily_donations = if days_active > 0 {
            format::round1(campaign.total_donations as f64 / days_active as f64)
        } else {
            0.0
        };

        Self {
            progress_percentage,
            completion_rate,
            days_active,
            avg_daily_donations,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CampaignDetailsDTO {
    /// `None` only when the database could not be read
    pub campaign: Option<CampaignDetailDTO>,
    pub donations: Vec<CampaignDonationDTO>,
    pub timeline: Vec<TimelineEntryDTO>,
    pub metrics: CampaignMetricsDTO,
}

// ************************* STATS ************************* //

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct CampaignsByStatusDTO {
    pub active: i64,
    pub completed: i64,
    pub pending: i64,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct PerformanceMetricsDTO {
    pub success_rate: f64,
    pub average_donors_per_campaign: f64,
    pub units_per_donor: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct CampaignStatsDTO {
    pub total_campaigns: i64,
    pub active_campaigns: i64,
    pub completed_campaigns: i64,
    pub pending_campaigns: i64,
    pub recent_donations: i64,
    pub total_donors: i64,
    pub total_units_collected: i64,
    pub success_rate: f64,
    pub average_donors_per_campaign: f64,
    pub period_days: i64,
    pub campaigns_by_status: CampaignsByStatusDTO,
    /// `donations_last_{period}_days` and `average_daily_donations`
    pub recent_activity: Map<String, Value>,
    pub performance_metrics: PerformanceMetricsDTO,
}

impl CampaignStatsDTO {
    pub fn new(counts: &CampaignCounts, recent_donations: i64, total_donors: i64, period: i64) -> Self {
        let ratio = |num: i64, den: i64| {
            if den > 0 {
                format::round1(num as f64 / den as f64)
            } else {
                0.0
            }
        };
        let success_rate = if counts.total > 0 {
            format::round1(counts.completed as f64 / counts.total as f64 * 100.0)
        } else {
            0.0
        };
        let average_donors_per_campaign = ratio(total_donors, counts.total);

        let mut recent_activity = Map::new();
        recent_activity.insert(format!("donations_last_{}_days", period), json!(recent_donations));
        recent_activity.insert(
            "average_daily_donations".to_string(),
            json!(ratio(recent_donations, period)),
        );

        Self {
            total_campaigns: counts.total,
            active_campaigns: counts.active,
            completed_campaigns: counts.completed,
            pending_campaigns: counts.pending,
            recent_donations,
            total_donors,
            total_units_collected: counts.total_units_collected,
            success_rate,
            average_donors_per_campaign,
            period_days: period,
            campaigns_by_status: CampaignsByStatusDTO {
                active: counts.active,
                completed: counts.completed,
                pending: counts.pending,
            },
            recent_activity,
            performance_metrics: PerformanceMetricsDTO {
                success_rate,
                average_donors_per_campaign,
                units_per_donor: ratio(counts.total_units_collected, total_donors),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn detail(units_needed: i64, units_collected: i64, total_donations: i64) -> CampaignDetailRow {
        CampaignDetailRow {
            id: 1,
            title: "Spring drive".into(),
            description: None,
            status: "active".into(),
            hospital_id: None,
            request_id: None,
            blood_type: Some("O+".into()),
            units_needed,
            urgency_level: None,
            request_location: None,
            request_description: None,
            hospital_name: None,
            contact_person: None,
            hospital_phone: None,
            hospital_address: None,
            start_date: date(3, 1),
            end_date: date(3, 31),
            created_at: date(3, 1).and_hms_opt(10, 0, 0).unwrap(),
            updated_at: date(3, 1).and_hms_opt(10, 0, 0).unwrap(),
            total_donations,
            units_collected,
            avg_donation_size: 1.0,
        }
    }

    #[test]
    fn phase_depends_on_today() {
        assert_eq!(campaign_phase(date(2, 28), date(3, 1), date(3, 31)), "upcoming");
        assert_eq!(campaign_phase(date(3, 1), date(3, 1), date(3, 31)), "active");
        assert_eq!(campaign_phase(date(3, 31), date(3, 1), date(3, 31)), "active");
        assert_eq!(campaign_phase(date(4, 1), date(3, 1), date(3, 31)), "completed");
    }

    #[test]
    fn metrics_cap_progress_and_round() {
        let now = date(3, 11).and_hms_opt(12, 0, 0).unwrap();

        let metrics = CampaignMetricsDTO::compute(&detail(3, 1, 3), 2, now);
        assert_eq!(metrics.progress_percentage, 33.3);
        assert_eq!(metrics.completion_rate, 66.7);
        assert_eq!(metrics.days_active, 10);
        assert_eq!(metrics.avg_daily_donations, 0.3);

        let over = CampaignMetricsDTO::compute(&detail(2, 9, 9), 9, now);
        assert_eq!(over.progress_percentage, 100.0);

        let empty = CampaignMetricsDTO::compute(&detail(0, 0, 0), 0, now);
        assert_eq!(empty, CampaignMetricsDTO {
            days_active: 10,
            ..Default::default()
        });
    }

    #[test]
    fn stats_derive_rates_and_dynamic_activity_key() {
        let counts = CampaignCounts {
            total: 8,
            active: 3,
            completed: 4,
            pending: 1,
            total_units_collected: 180,
        };
        let stats = CampaignStatsDTO::new(&counts, 45, 230, 30);
        assert_eq!(stats.success_rate, 50.0);
        assert_eq!(stats.average_donors_per_campaign, 28.8);
        assert_eq!(stats.performance_metrics.units_per_donor, 0.8);
        assert_eq!(stats.recent_activity["donations_last_30_days"], json!(45));
        assert_eq!(stats.recent_activity["average_daily_donations"], json!(1.5));

        let empty = CampaignStatsDTO::new(&CampaignCounts::default(), 0, 0, 7);
        assert_eq!(empty.success_rate, 0.0);
        assert!(empty.recent_activity.contains_key("donations_last_7_days"));
    }
}

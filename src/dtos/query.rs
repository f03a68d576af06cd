//! Query DTOs - query string parameters of the read endpoints
//!
//! Numeric parameters arrive as raw strings and are coerced leniently:
//! anything that does not parse as an integer takes the default, and the
//! result is clamped into the parameter's range.

use serde::Deserialize;

/// Parses `raw` as an integer, falling back to `default`, then clamps it into `[min, max]`.
pub fn bounded(raw: Option<&str>, default: i64, min: i64, max: i64) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

/// A positive identifier; empty, zero, negative or non-numeric input means "none".
pub fn identifier(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|value| value.trim().parse::<i32>().ok())
        .filter(|id| *id > 0)
}

/// Truthy unless missing, empty, `0` or `false`.
pub fn flag(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(value) => !value.eq_ignore_ascii_case("false"),
    }
}

/// A non-empty text filter
pub fn text(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Deserialize, Debug, Default)]
pub struct AppointmentsQuery {
    pub user_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CampaignListQuery {
    pub active: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl CampaignListQuery {
    pub fn limit(&self) -> i64 {
        bounded(self.limit.as_deref(), 10, 1, 100)
    }

    pub fn offset(&self) -> i64 {
        bounded(self.offset.as_deref(), 0, 0, i64::from(i32::MAX))
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct CampaignDetailsQuery {
    pub id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CampaignStatsQuery {
    pub status: Option<String>,
    pub period: Option<String>,
}

impl CampaignStatsQuery {
    pub fn period(&self) -> i64 {
        bounded(self.period.as_deref(), 30, 1, 365)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct EmergencyRequestsQuery {
    pub status: Option<String>,
    pub limit: Option<String>,
}

impl EmergencyRequestsQuery {
    pub fn limit(&self) -> i64 {
        bounded(self.limit.as_deref(), 20, 1, 100)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct HospitalActivitiesQuery {
    pub limit: Option<String>,
    pub hospital_id: Option<String>,
}

impl HospitalActivitiesQuery {
    pub fn limit(&self) -> i64 {
        bounded(self.limit.as_deref(), 10, 1, 50)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct DonationTrendsQuery {
    pub days: Option<String>,
    pub hospital_id: Option<String>,
    pub blood_type: Option<String>,
}

impl DonationTrendsQuery {
    pub fn days(&self) -> i64 {
        bounded(self.days.as_deref(), 30, 1, 365)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct InventoryHistoryQuery {
    pub limit: Option<String>,
    pub hospital_id: Option<String>,
    pub blood_type: Option<String>,
    pub action: Option<String>,
    pub days: Option<String>,
}

impl InventoryHistoryQuery {
    pub fn limit(&self) -> i64 {
        bounded(self.limit.as_deref(), 20, 1, 100)
    }

    pub fn days(&self) -> i64 {
        bounded(self.days.as_deref(), 30, 1, 365)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct InventoryStatsQuery {
    pub hospital_id: Option<String>,
    pub period: Option<String>,
}

impl InventoryStatsQuery {
    pub fn period(&self) -> i64 {
        bounded(self.period.as_deref(), 30, 1, 365)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct DonorSearchQuery {
    pub query: Option<String>,
    pub blood_type: Option<String>,
    pub limit: Option<String>,
}

impl DonorSearchQuery {
    pub fn limit(&self) -> i64 {
        bounded(self.limit.as_deref(), 10, 1, 50)
    }
}

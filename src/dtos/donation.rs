//! Donation trend DTOs

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Clone)]
pub struct TrendPeriodDTO {
    pub days: i64,
    pub start_date: String,
    pub end_date: String,
    pub start_formatted: String,
    pub end_formatted: String,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TrendStatisticsDTO {
    pub total_donations: i64,
    pub average_daily: f64,
    pub max_daily: i64,
    pub min_daily: i64,
    pub trend_direction: &'static str,
    pub trend_percentage: f64,
    pub active_days: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct DailyChartDTO {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
    pub title: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct BloodTypeChartDTO {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
    pub colors: Vec<&'static str>,
    pub title: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct DonationTrendsDTO {
    pub period: TrendPeriodDTO,
    pub statistics: TrendStatisticsDTO,
    pub daily_chart: DailyChartDTO,
    pub blood_type_chart: BloodTypeChartDTO,
    /// Donations per day, keyed by `Y-m-d`
    pub daily_totals: BTreeMap<String, i64>,
    pub blood_type_totals: BTreeMap<String, i64>,
}

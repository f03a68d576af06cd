//! Donation services - donation trend charts

use super::recover;
use crate::core::{AppError, AppState, format};
use crate::dtos::{
    ApiResponse, BloodTypeChartDTO, DailyChartDTO, DonationTrendsDTO, DonationTrendsQuery,
    TrendPeriodDTO, TrendStatisticsDTO,
    query::{identifier, text},
};
use crate::entities::{BloodType, DailyDonationCount};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Relative change between halves above which a trend is reported
const TREND_THRESHOLD: f64 = 5.0;

/// Compares the average of the first half of `series` with the second half.
/// Returns the direction and the change in percent (1 dp); with no baseline
/// the series is stable.
pub(crate) fn analyze_trend(series: &[i64]) -> (&'static str, f64) {
    let half = series.len() / 2;
    let average = |values: &[i64]| {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<i64>() as f64 / values.len() as f64
        }
    };
    let first = average(&series[..half]);
    let second = average(&series[half..]);
    if first <= 0.0 {
        return ("stable", 0.0);
    }

    let percentage = format::round1((second - first) / first * 100.0);
    let direction = if percentage > TREND_THRESHOLD {
        "increasing"
    } else if percentage < -TREND_THRESHOLD {
        "decreasing"
    } else {
        "stable"
    };
    (direction, percentage)
}

/// Folds per day and blood type counts into daily totals and blood type totals
fn fold_counts(
    rows: &[DailyDonationCount],
) -> (BTreeMap<NaiveDate, i64>, BTreeMap<String, i64>) {
    let mut daily = BTreeMap::new();
    let mut by_type = BTreeMap::new();
    for row in rows {
        *daily.entry(row.donation_day).or_insert(0) += row.donation_count;
        *by_type.entry(row.blood_type.clone()).or_insert(0) += row.donation_count;
    }
    (daily, by_type)
}

fn statistics(series: &[i64]) -> TrendStatisticsDTO {
    let total: i64 = series.iter().sum();
    let (trend_direction, trend_percentage) = analyze_trend(series);
    if total == 0 {
        return TrendStatisticsDTO {
            trend_direction,
            trend_percentage,
            ..Default::default()
        };
    }

    TrendStatisticsDTO {
        total_donations: total,
        average_daily: format::round1(total as f64 / series.len() as f64),
        max_daily: series.iter().copied().max().unwrap_or(0),
        min_daily: series.iter().copied().min().unwrap_or(0),
        trend_direction,
        trend_percentage,
        active_days: series.iter().filter(|count| **count > 0).count(),
    }
}

fn build_trends(
    days: i64,
    start: NaiveDate,
    end: NaiveDate,
    rows: &[DailyDonationCount],
) -> DonationTrendsDTO {
    let (daily, by_type) = fold_counts(rows);
    let series: Vec<i64> = daily.values().copied().collect();

    DonationTrendsDTO {
        period: TrendPeriodDTO {
            days,
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            start_formatted: format::short_date(start),
            end_formatted: format::short_date(end),
        },
        statistics: statistics(&series),
        daily_chart: DailyChartDTO {
            labels: daily.keys().map(|day| format::month_day(*day)).collect(),
            data: series,
            title: format!("Daily Donations - Last {} Days", days),
        },
        blood_type_chart: BloodTypeChartDTO {
            labels: by_type.keys().cloned().collect(),
            data: by_type.values().copied().collect(),
            colors: by_type
                .keys()
                .map(|label| BloodType::parse(label).map_or("#999999", |t| t.chart_color()))
                .collect(),
            title: format!("Blood Type Distribution - Last {} Days", days),
        },
        daily_totals: daily
            .iter()
            .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), *count))
            .collect(),
        blood_type_totals: by_type,
    }
}

#[instrument(skip(state, params), fields(days = ?params.days, blood_type = ?params.blood_type))]
pub async fn get_donation_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DonationTrendsQuery>,
) -> Result<Json<ApiResponse<DonationTrendsDTO>>, AppError> {
    let days = params.days();
    let hospital_id = identifier(params.hospital_id.as_deref());
    let blood_type = text(params.blood_type.as_deref())
        .map(|raw| BloodType::parse(raw).ok_or_else(|| AppError::bad_request("Invalid blood type")))
        .transpose()?;

    let end = format::now().date();
    let start = end - Duration::days(days);
    debug!("Reading donations from {} to {}", start, end);

    let mut degraded = false;
    let rows = recover(
        state.donation.daily_counts(start, hospital_id, blood_type).await,
        "daily donation counts",
        &mut degraded,
    );

    let trends = build_trends(days, start, end, &rows);
    info!(
        "{} donations over {} active days, trend {}",
        trends.statistics.total_donations,
        trends.statistics.active_days,
        trends.statistics.trend_direction
    );

    Ok(Json(
        ApiResponse::ok(
            format!("Donation trends for last {} days retrieved successfully", days),
            trends,
        )
        .degraded(degraded),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn count(d: u32, blood_type: &str, donation_count: i64) -> DailyDonationCount {
        DailyDonationCount {
            donation_day: day(d),
            blood_type: blood_type.into(),
            donation_count,
        }
    }

    #[test]
    fn trend_compares_half_averages() {
        assert_eq!(analyze_trend(&[10, 10, 20, 20]), ("increasing", 100.0));
        assert_eq!(analyze_trend(&[20, 20, 10, 10]), ("decreasing", -50.0));
        assert_eq!(analyze_trend(&[100, 104]), ("stable", 4.0));
    }

    #[test]
    fn odd_series_puts_the_middle_in_the_second_half() {
        // halves [10] and [10, 13]: 11.5 vs 10
        assert_eq!(analyze_trend(&[10, 10, 13]), ("increasing", 15.0));
    }

    #[test]
    fn trend_without_baseline_is_stable() {
        assert_eq!(analyze_trend(&[]), ("stable", 0.0));
        assert_eq!(analyze_trend(&[7]), ("stable", 0.0));
        assert_eq!(analyze_trend(&[0, 0, 5, 9]), ("stable", 0.0));
    }

    #[test]
    fn rows_fold_into_sorted_totals() {
        let rows = vec![
            count(3, "O+", 2),
            count(1, "A-", 1),
            count(3, "A-", 4),
            count(2, "O+", 0),
        ];
        let trends = build_trends(7, day(1), day(8), &rows);

        assert_eq!(trends.daily_chart.labels, ["Apr 1", "Apr 2", "Apr 3"]);
        assert_eq!(trends.daily_chart.data, [1, 0, 6]);
        assert_eq!(trends.daily_totals["2025-04-03"], 6);
        assert_eq!(trends.blood_type_chart.labels, ["A-", "O+"]);
        assert_eq!(trends.blood_type_chart.data, [5, 2]);
        assert_eq!(trends.blood_type_chart.colors, ["#FF9F40", "#FF6384"]);
        assert_eq!(trends.statistics.total_donations, 7);
        assert_eq!(trends.statistics.max_daily, 6);
        assert_eq!(trends.statistics.min_daily, 0);
        assert_eq!(trends.statistics.active_days, 2);
        assert_eq!(trends.statistics.average_daily, 2.3);
        assert_eq!(trends.period.start_formatted, "Apr 1, 2025");
        assert_eq!(trends.daily_chart.title, "Daily Donations - Last 7 Days");
    }

    #[test]
    fn no_donations_gives_zeroed_statistics() {
        let trends = build_trends(30, day(1), day(30), &[]);
        assert_eq!(trends.statistics.total_donations, 0);
        assert_eq!(trends.statistics.trend_direction, "stable");
        assert!(trends.daily_chart.data.is_empty());
        assert!(trends.blood_type_totals.is_empty());
    }
}

//! Activity services - the hospital activity feed

use super::recover;
use crate::core::{AppState, format};
use crate::dtos::{ActivityItemDTO, ActivityStatsDTO, ApiResponse, HospitalActivitiesQuery, query};
use axum::{
    Json,
    extract::{Query, State},
};
use futures::future::join;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Newest first, at most `limit` items
fn latest(mut items: Vec<ActivityItemDTO>, limit: usize) -> Vec<ActivityItemDTO> {
    items.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    items.truncate(limit);
    items
}

#[instrument(skip(state, params), fields(hospital_id = ?params.hospital_id, limit = ?params.limit))]
pub async fn get_hospital_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HospitalActivitiesQuery>,
) -> Json<ApiResponse<Vec<ActivityItemDTO>>> {
    let limit = params.limit();
    let hospital_id = query::identifier(params.hospital_id.as_deref());
    debug!("Building activity feed");

    // Each source is read on its own; a failing one only drops its items
    let (donations, requests) = join(
        state.donation.recent_activity(hospital_id, limit),
        state.request.recent_activity(limit),
    )
    .await;

    let mut degraded = false;
    let donations = recover(donations, "donation activity", &mut degraded);
    let requests = recover(requests, "request activity", &mut degraded);

    let now = format::now();
    let items = donations
        .into_iter()
        .map(|row| ActivityItemDTO::from_donation(row, now))
        .chain(
            requests
                .into_iter()
                .map(|row| ActivityItemDTO::from_request(row, now)),
        )
        .collect();
    let items = latest(items, limit as usize);
    let stats = ActivityStatsDTO::new(&items, now);
    info!("Activity feed holds {} items", items.len());

    Json(
        ApiResponse::ok("Hospital activities retrieved successfully", items)
            .with_stats(stats)
            .with_filters(json!({
                "hospital_id": hospital_id,
                "limit": limit,
            }))
            .degraded(degraded),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DonationActivityRow, RequestActivityRow};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn donation(id: i32, day: u32) -> ActivityItemDTO {
        ActivityItemDTO::from_donation(
            DonationActivityRow {
                id,
                activity_date: at(day),
                blood_type: "O+".into(),
                quantity: 1,
                status: "completed".into(),
                donor_name: None,
                hospital_name: None,
            },
            at(28),
        )
    }

    fn request(id: i32, day: u32) -> ActivityItemDTO {
        ActivityItemDTO::from_request(
            RequestActivityRow {
                id,
                activity_date: at(day),
                blood_type: "AB-".into(),
                units_needed: 3,
                status: "pending".into(),
                urgency_level: "critical".into(),
                hospital_name: Some("General".into()),
            },
            at(28),
        )
    }

    #[test]
    fn feed_interleaves_sources_newest_first() {
        let items = vec![donation(1, 3), donation(2, 10), request(1, 7), request(2, 12)];
        let feed = latest(items, 3);
        let ids: Vec<&str> = feed.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["request_2", "donation_2", "request_1"]);
        assert_eq!(feed[0].color, "danger");
    }
}

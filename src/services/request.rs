//! Request services - emergency blood requests

use super::recover;
use crate::core::{AppState, format};
use crate::dtos::{
    ApiResponse, EmergencyRequestDTO, EmergencyRequestsQuery, EmergencyStatsDTO, query::text,
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[instrument(skip(state, params), fields(status = ?params.status, limit = ?params.limit))]
pub async fn get_emergency_requests(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EmergencyRequestsQuery>,
) -> Json<ApiResponse<Vec<EmergencyRequestDTO>>> {
    let limit = params.limit();
    let status = text(params.status.as_deref()).filter(|status| *status != "all");
    debug!("Fetching emergency requests");

    let mut degraded = false;
    let rows = recover(
        state.request.emergency(status, limit).await,
        "emergency requests",
        &mut degraded,
    );

    let now = format::now();
    let requests: Vec<EmergencyRequestDTO> = rows
        .into_iter()
        .map(|row| EmergencyRequestDTO::from_row(row, now))
        .collect();
    let stats = EmergencyStatsDTO::new(&requests, now);
    info!(
        "Found {} emergency requests ({} critical)",
        stats.total_requests, stats.critical_count
    );

    Json(
        ApiResponse::ok("Emergency requests retrieved successfully", requests)
            .with_stats(stats)
            .with_filters(json!({
                "status": status.unwrap_or("all"),
                "limit": limit,
            }))
            .degraded(degraded),
    )
}

//! Admin services - dashboard statistics

use super::recover;
use crate::core::AppState;
use crate::dtos::{AdminStatsDTO, ApiResponse, SystemHealthDTO};
use axum::{Json, extract::State};
use futures::future::join3;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Window of the "recent registrations" counters
const RECENT_REGISTRATION_DAYS: i64 = 30;

#[instrument(skip(state))]
pub async fn get_admin_stats(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<AdminStatsDTO>> {
    debug!("Collecting admin dashboard statistics");

    let ((roles, hospitals, totals), (registrations, distribution, tables)) = futures::future::join(
        join3(
            state.user.count_active_by_role(),
            state.hospital.approval_counts(),
            state.inventory.totals(),
        ),
        join3(
            state.user.registrations_since(RECENT_REGISTRATION_DAYS),
            state.inventory.distribution(),
            state.system.count_tables(),
        ),
    )
    .await;

    let mut degraded = false;
    let roles = recover(roles, "user counts", &mut degraded);
    let hospitals = recover(hospitals, "hospital approvals", &mut degraded);
    let totals = recover(totals, "inventory totals", &mut degraded);
    let registrations = recover(registrations, "recent registrations", &mut degraded);
    let distribution = recover(distribution, "blood type distribution", &mut degraded);
    let total_tables = recover(tables, "table count", &mut degraded);

    let health = SystemHealthDTO {
        database_status: if degraded { "offline" } else { "online" },
        total_tables,
        last_backup: None,
        uptime_seconds: state.started_at.elapsed().as_secs(),
    };
    let stats = AdminStatsDTO::new(
        &roles,
        &hospitals,
        &totals,
        &registrations,
        distribution,
        health,
    );

    info!("Admin stats ready: {} users, {} units", stats.total_users, stats.total_blood_units);
    Json(ApiResponse::ok("Admin statistics retrieved successfully", stats).degraded(degraded))
}

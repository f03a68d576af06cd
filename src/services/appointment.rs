//! Appointment services - a donor's donation appointments

use super::recover;
use crate::core::{AppError, AppState, format};
use crate::dtos::{
    ApiResponse, AppointmentDTO, AppointmentStatsDTO, AppointmentsDTO, AppointmentsQuery,
    query::identifier,
};
use crate::entities::{AppointmentStatus, Donor};
use crate::repositories::Read;
use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, params), fields(user_id = ?params.user_id, status = ?params.status))]
pub async fn get_appointments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AppointmentsQuery>,
) -> Result<Json<ApiResponse<AppointmentsDTO>>, AppError> {
    debug!("Fetching donor appointments");

    let donor_id = identifier(params.user_id.as_deref())
        .ok_or_else(|| AppError::bad_request("User ID is required"))?;

    let mut degraded = false;
    match state.user.read(&donor_id).await {
        Ok(Some(Donor { full_name, .. })) => debug!("Appointments requested for {}", full_name),
        Ok(None) => {
            warn!("User {} is not an active donor", donor_id);
            return Err(AppError::not_found("User not found or not a donor"));
        }
        Err(err) => {
            warn!("Failed to verify donor {}: {}", donor_id, err);
            degraded = true;
        }
    }

    // "all" and unrecognised values both mean no filter
    let status = params.status.as_deref().and_then(AppointmentStatus::parse);

    let rows = if degraded {
        Vec::new()
    } else {
        recover(
            state.appointment.for_donor(donor_id, status).await,
            "appointments",
            &mut degraded,
        )
    };

    let now = format::now();
    let appointments = AppointmentsDTO::split(
        rows.into_iter()
            .map(|row| AppointmentDTO::from_row(row, now))
            .collect(),
    );
    let stats = AppointmentStatsDTO::from(&appointments);
    info!(
        "Found {} appointments ({} upcoming)",
        stats.total, stats.upcoming
    );

    Ok(Json(
        ApiResponse::ok("Appointments retrieved successfully", appointments)
            .with_stats(stats)
            .degraded(degraded),
    ))
}

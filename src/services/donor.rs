//! Donor services - donor search

use super::recover;
use crate::core::{AppError, AppState, format};
use crate::dtos::{ApiResponse, DonorDTO, DonorSearchQuery, DonorSearchStatsDTO, query::text};
use crate::entities::BloodType;
use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[instrument(skip(state, params), fields(query = ?params.query, blood_type = ?params.blood_type))]
pub async fn search_donors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DonorSearchQuery>,
) -> Result<Json<ApiResponse<Vec<DonorDTO>>>, AppError> {
    let limit = params.limit();
    let search = text(params.query.as_deref());
    let blood_type = text(params.blood_type.as_deref())
        .map(|raw| BloodType::parse(raw).ok_or_else(|| AppError::bad_request("Invalid blood type")))
        .transpose()?;
    debug!("Searching donors (limit {})", limit);

    let mut degraded = false;
    let rows = recover(
        state.user.search_donors(search, blood_type, limit).await,
        "donors",
        &mut degraded,
    );

    let now = format::now();
    let donors: Vec<DonorDTO> = rows
        .into_iter()
        .map(|row| DonorDTO::from_row(row, now))
        .collect();
    let stats = DonorSearchStatsDTO::new(
        &donors,
        search.unwrap_or(""),
        blood_type.map_or("", |t| t.as_str()),
    );
    info!(
        "Found {} donors, {} eligible",
        stats.total_found, stats.eligible_count
    );

    Ok(Json(
        ApiResponse::ok("Donor search completed successfully", donors)
            .with_stats(stats)
            .degraded(degraded),
    ))
}

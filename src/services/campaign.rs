//! Campaign services - listing, details and aggregate statistics

use super::recover;
use crate::core::{AppError, AppState, format};
use crate::dtos::{
    ApiResponse, CampaignDTO, CampaignDetailDTO, CampaignDetailsDTO, CampaignDetailsQuery,
    CampaignDonationDTO, CampaignListQuery, CampaignMetricsDTO, CampaignStatsDTO,
    CampaignStatsQuery, TimelineEntryDTO,
    query::{flag, identifier},
};
use crate::entities::UserRole;
use crate::repositories::Read;
use axum::{
    Json,
    extract::{Query, State},
};
use axum_macros::debug_handler;
use futures::future::{join, join3};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, params), fields(active = ?params.active))]
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CampaignListQuery>,
) -> Json<ApiResponse<Vec<CampaignDTO>>> {
    let active_only = flag(params.active.as_deref());
    let limit = params.limit();
    let offset = params.offset();
    debug!("Listing campaigns (limit {}, offset {})", limit, offset);

    let mut degraded = false;
    let rows = recover(
        state.campaign.list(active_only, limit, offset).await,
        "campaigns",
        &mut degraded,
    );

    let today = format::now().date();
    let campaigns: Vec<CampaignDTO> = rows
        .into_iter()
        .map(|row| CampaignDTO::from_row(row, today))
        .collect();
    info!("Found {} campaigns", campaigns.len());

    Json(
        ApiResponse::ok("Campaigns retrieved successfully", campaigns)
            .with_filters(json!({
                "active": active_only,
                "limit": limit,
                "offset": offset,
            }))
            .degraded(degraded),
    )
}

#[debug_handler]
#[instrument(skip(state, params), fields(id = ?params.id))]
pub async fn get_campaign_details(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CampaignDetailsQuery>,
) -> Result<Json<ApiResponse<CampaignDetailsDTO>>, AppError> {
    let campaign_id = identifier(params.id.as_deref())
        .ok_or_else(|| AppError::bad_request("Campaign ID is required"))?;
    debug!("Fetching details of campaign {}", campaign_id);

    let campaign = match state.campaign.read(&campaign_id).await {
        Ok(Some(campaign)) => campaign,
        Ok(None) => {
            warn!("Campaign {} not found", campaign_id);
            return Err(AppError::not_found("Campaign not found"));
        }
        Err(err) => {
            warn!("Failed to load campaign {}: {}", campaign_id, err);
            let empty = CampaignDetailsDTO {
                campaign: None,
                donations: Vec::new(),
                timeline: Vec::new(),
                metrics: CampaignMetricsDTO::default(),
            };
            return Ok(Json(
                ApiResponse::ok("Campaign details retrieved successfully", empty).degraded(true),
            ));
        }
    };

    let (donations, timeline) = join(
        state.campaign.donations(campaign_id),
        state.campaign.timeline(campaign_id),
    )
    .await;
    let mut degraded = false;
    let donations = recover(donations, "campaign donations", &mut degraded);
    let timeline = recover(timeline, "campaign timeline", &mut degraded);

    let completed = donations
        .iter()
        .filter(|donation| donation.status == "completed")
        .count();
    let metrics = CampaignMetricsDTO::compute(&campaign, completed, format::now());
    info!(
        "Campaign {} has {} donations, {}% progress",
        campaign_id,
        donations.len(),
        metrics.progress_percentage
    );

    let details = CampaignDetailsDTO {
        campaign: Some(CampaignDetailDTO::from(campaign)),
        donations: donations.into_iter().map(CampaignDonationDTO::from).collect(),
        timeline: timeline.into_iter().map(TimelineEntryDTO::from).collect(),
        metrics,
    };

    Ok(Json(
        ApiResponse::ok("Campaign details retrieved successfully", details).degraded(degraded),
    ))
}

#[instrument(skip(state, params), fields(status = ?params.status))]
pub async fn get_campaign_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CampaignStatsQuery>,
) -> Json<ApiResponse<CampaignStatsDTO>> {
    let period = params.period();
    debug!("Computing campaign statistics over {} days", period);

    let (counts, recent_donations, total_donors) = join3(
        state.campaign.counts(),
        state.donation.count_since(period),
        state.user.count_by_role(UserRole::Donor),
    )
    .await;

    let mut degraded = false;
    let counts = recover(counts, "campaign counts", &mut degraded);
    let recent_donations = recover(recent_donations, "recent donations", &mut degraded);
    let total_donors = recover(total_donors, "donor count", &mut degraded);

    let stats = CampaignStatsDTO::new(&counts, recent_donations, total_donors, period);
    info!(
        "{} campaigns, {} active",
        stats.total_campaigns, stats.active_campaigns
    );

    Json(
        ApiResponse::ok("Campaign statistics retrieved successfully", stats)
            .with_filters(json!({
                "status": params.status.as_deref().unwrap_or("all"),
                "period": period,
            }))
            .degraded(degraded),
    )
}

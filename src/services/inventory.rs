//! Inventory services - stock updates, change history and stock statistics

use super::recover;
use crate::core::{AppError, AppState, format, store_unavailable};
use crate::dtos::{
    ActivityCountsDTO, ApiResponse, HistoryItemDTO, HistoryStatsDTO, InventoryHistoryQuery,
    InventoryStatsDTO, InventoryStatsQuery, InventorySummaryDTO, InventoryTrendsDTO,
    InventoryUpdateDTO, StockLevelDTO, StockLevelsDTO, UpdateInventoryDTO,
    query::{identifier, text},
};
use crate::entities::{
    BloodInventory, BloodType, BloodTypeStock, InventoryAction, NewHistoryEntry, StockStatus,
    enums::critical_level_for,
};
use crate::repositories::{HistoryFilter, InventoryChange};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use axum_macros::debug_handler;
use futures::future::{join, join3};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

// ************************* UPDATE ************************* //

fn update_message(action: &InventoryAction, units: i64, blood_type: BloodType) -> String {
    match action {
        InventoryAction::Add => format!("Added {} units of {} blood to inventory", units, blood_type),
        InventoryAction::Subtract => {
            format!("Removed {} units of {} blood from inventory", units, blood_type)
        }
        InventoryAction::Set => format!("Set {} blood inventory to {} units", blood_type, units),
        InventoryAction::Unknown(raw) => format!(
            "Unknown action '{}', {} blood inventory left unchanged",
            raw, blood_type
        ),
    }
}

/// Stand-in for the stored row when the database could not be reached
fn echo_row(blood_type: BloodType, hospital_id: Option<i32>, units: i64) -> BloodInventory {
    BloodInventory {
        id: 0,
        hospital_id,
        blood_type: blood_type.as_str().to_string(),
        units_available: i32::try_from(units).unwrap_or(i32::MAX),
        units_required: 0,
        units_reserved: 0,
        last_updated: format::now(),
    }
}

/// Writes the change to inventory_history and hospital_activities.
/// Failures are logged and never surface to the caller.
async fn record_audit(state: &AppState, entry: &NewHistoryEntry) {
    let payload = match serde_json::to_string(&entry.payload()) {
        Ok(payload) => payload,
        Err(err) => {
            error!("Failed to encode inventory activity payload: {}", err);
            return;
        }
    };

    let (history, activity) = join(
        state.activity.record_history(entry),
        state.activity.log_inventory_update(entry, &payload),
    )
    .await;
    if let Err(err) = history {
        warn!("Could not record inventory history: {}", err);
    }
    if let Err(err) = activity {
        warn!("Could not log inventory activity: {}", err);
    }
}

#[debug_handler]
#[instrument(skip(state, payload))]
pub async fn update_inventory(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateInventoryDTO>, JsonRejection>,
) -> Result<Json<ApiResponse<InventoryUpdateDTO>>, AppError> {
    let Json(body) = payload?;
    body.validate()?;

    let blood_type = body
        .blood_type
        .as_deref()
        .and_then(BloodType::parse)
        .ok_or_else(|| AppError::bad_request("Invalid blood type"))?;
    let units = body
        .units
        .ok_or_else(|| AppError::bad_request("Blood type and units are required"))?;
    let action = InventoryAction::parse(body.action.as_deref());
    let hospital_id = body.hospital();
    debug!(
        "Applying {} of {} units to {} stock",
        action.as_str(),
        units,
        blood_type
    );

    let (change, degraded) = match state
        .inventory
        .apply_update(blood_type, hospital_id, &action, units)
        .await
    {
        Ok(change) => {
            let entry = NewHistoryEntry {
                hospital_id,
                blood_type: blood_type.as_str().to_string(),
                action: action.as_str().to_string(),
                units,
                previous_quantity: change.previous_quantity,
                new_quantity: change.final_quantity,
                reason: body.reason.clone(),
                modified_by: body.modified_by,
            };
            record_audit(&state, &entry).await;
            (change, false)
        }
        Err(err) if store_unavailable(&err) => {
            warn!("Database unreachable, echoing inventory update: {}", err);
            let change = InventoryChange {
                previous_quantity: 0,
                final_quantity: units,
                rows: vec![echo_row(blood_type, hospital_id, units)],
            };
            (change, true)
        }
        Err(err) => {
            error!("Inventory update failed: {}", err);
            return Err(err.into());
        }
    };

    info!(
        "{} stock went from {} to {} units",
        blood_type, change.previous_quantity, change.final_quantity
    );
    let message = update_message(&action, units, blood_type);
    let mut response = ApiResponse::ok(
        message,
        InventoryUpdateDTO {
            blood_type,
            units,
            action,
            hospital_id,
            previous_quantity: change.previous_quantity,
            final_quantity: change.final_quantity,
            updated_inventory: change.rows,
            timestamp: format::sql_datetime(format::now()),
        },
    );
    if degraded {
        // Keep the action message; the flag alone marks the echo
        response.degraded = true;
    }
    Ok(Json(response))
}

// ************************* HISTORY ************************* //

pub(crate) fn history_stats(items: &[HistoryItemDTO], days: i64) -> HistoryStatsDTO {
    let with_action = |action: &str| items.iter().filter(|item| item.action == action).count();

    let mut blood_types_affected: Vec<String> = Vec::new();
    for item in items {
        if !blood_types_affected.contains(&item.blood_type) {
            blood_types_affected.push(item.blood_type.clone());
        }
    }

    let total_units_added = items
        .iter()
        .filter(|item| item.action == "add")
        .map(|item| item.change_amount)
        .sum();
    let total_units_removed = items
        .iter()
        .filter(|item| item.action == "subtract" || item.action == "expired")
        .map(|item| item.change_amount)
        .sum::<i64>()
        .abs();

    HistoryStatsDTO {
        total_changes: items.len(),
        additions: with_action("add"),
        removals: with_action("subtract"),
        updates: with_action("set"),
        expirations: with_action("expired"),
        period_days: days,
        blood_types_affected,
        total_units_added,
        total_units_removed,
    }
}

#[instrument(skip(state, params), fields(blood_type = ?params.blood_type, action = ?params.action))]
pub async fn get_inventory_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InventoryHistoryQuery>,
) -> Json<ApiResponse<Vec<HistoryItemDTO>>> {
    let filter = HistoryFilter {
        days: params.days(),
        hospital_id: identifier(params.hospital_id.as_deref()),
        blood_type: text(params.blood_type.as_deref()).map(str::to_string),
        action: text(params.action.as_deref()).map(str::to_string),
        limit: params.limit(),
    };
    debug!("Reading inventory history over {} days", filter.days);

    let now = format::now();
    let mut degraded = false;
    let rows = recover(
        state.activity.history(&filter).await,
        "inventory history",
        &mut degraded,
    );
    let mut items: Vec<HistoryItemDTO> = rows
        .into_iter()
        .map(|row| HistoryItemDTO::from_history(row, now))
        .collect();

    if items.is_empty() && !degraded {
        debug!("No inventory_history rows, falling back to the activity log");
        let activities = recover(
            state.activity.inventory_activities(&filter).await,
            "inventory activities",
            &mut degraded,
        );
        items = activities
            .into_iter()
            .map(|row| HistoryItemDTO::from_activity(row, now))
            .collect();
    }

    let stats = history_stats(&items, filter.days);
    info!("Found {} inventory changes", items.len());

    Json(
        ApiResponse::ok("Inventory history retrieved successfully", items)
            .with_stats(stats)
            .with_filters(json!({
                "limit": filter.limit,
                "hospital_id": filter.hospital_id,
                "blood_type": filter.blood_type,
                "action": filter.action,
                "days": filter.days,
            }))
            .degraded(degraded),
    )
}

// ************************* STATISTICS ************************* //

/// Sorts each blood type into critical, low or good against its critical level
pub(crate) fn classify_stock(by_blood_type: &[BloodTypeStock]) -> StockLevelsDTO {
    let mut levels = StockLevelsDTO::default();
    for stock in by_blood_type {
        let critical_level = critical_level_for(&stock.blood_type);
        let status = StockStatus::classify(stock.total_units, critical_level);
        let level = StockLevelDTO {
            blood_type: stock.blood_type.clone(),
            quantity: stock.total_units,
            critical_level,
            status,
        };
        match status {
            StockStatus::Critical => levels.critical.push(level),
            StockStatus::Low => levels.low.push(level),
            StockStatus::Good => levels.good.push(level),
        }
    }
    levels.critical_count = levels.critical.len();
    levels.low_count = levels.low.len();
    levels.good_count = levels.good.len();
    levels
}

/// 100, minus 20 per critical and 10 per low type, floored at 0; 0 without stock
pub(crate) fn health_score(blood_types: usize, levels: &StockLevelsDTO) -> i64 {
    if blood_types == 0 {
        return 0;
    }
    let penalty = 20 * levels.critical_count as i64 + 10 * levels.low_count as i64;
    (100 - penalty).max(0)
}

#[instrument(skip(state, params), fields(hospital_id = ?params.hospital_id, period = ?params.period))]
pub async fn get_inventory_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InventoryStatsQuery>,
) -> Json<ApiResponse<InventoryStatsDTO>> {
    let period = params.period();
    let hospital_id = identifier(params.hospital_id.as_deref());
    debug!("Computing inventory statistics");

    let (by_blood_type, summary, counts) = join3(
        state.inventory.stock_by_blood_type(hospital_id),
        state.inventory.summary(hospital_id),
        state.activity.counts_since(period, hospital_id),
    )
    .await;

    let mut degraded = false;
    let by_blood_type = recover(by_blood_type, "stock by blood type", &mut degraded);
    let summary = recover(summary, "inventory summary", &mut degraded);
    let counts = recover(counts, "activity counts", &mut degraded);

    let stock_levels = classify_stock(&by_blood_type);
    let health_score = health_score(by_blood_type.len(), &stock_levels);
    let critical_trend = if stock_levels.critical_count > 0 {
        "concerning"
    } else {
        "good"
    };

    let stats = InventoryStatsDTO {
        summary: InventorySummaryDTO {
            total_units: summary.total_units,
            blood_types_available: summary.blood_types_available,
            average_units_per_type: format::round1(summary.average_units_per_type),
            lowest_stock: summary.lowest_stock,
            highest_stock: summary.highest_stock,
        },
        by_blood_type,
        stock_levels,
        activity: ActivityCountsDTO {
            period_days: period,
            total_activities: counts.total_activities,
            inventory_updates: counts.inventory_updates,
            donations: counts.donations,
            requests: counts.requests,
        },
        health_score,
        trends: InventoryTrendsDTO {
            inventory_trend: "stable",
            activity_trend: "increasing",
            critical_trend,
        },
    };
    info!(
        "Inventory health score {} ({} critical types)",
        stats.health_score, stats.stock_levels.critical_count
    );

    Json(
        ApiResponse::ok("Inventory statistics retrieved successfully", stats).degraded(degraded),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::InventoryHistoryRow;
    use chrono::NaiveDate;

    fn stock(blood_type: &str, total_units: i64) -> BloodTypeStock {
        BloodTypeStock {
            blood_type: blood_type.into(),
            total_units,
            avg_units: total_units as f64,
            locations: 1,
        }
    }

    fn change(id: i32, blood_type: &str, action: &str, previous: i32, new: i32) -> HistoryItemDTO {
        let created_at = NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        HistoryItemDTO::from_history(
            InventoryHistoryRow {
                id,
                blood_type: blood_type.into(),
                action: action.into(),
                previous_quantity: previous,
                new_quantity: new,
                change_amount: new - previous,
                reason: None,
                hospital_id: None,
                hospital_name: None,
                modified_by: None,
                modified_by_name: None,
                created_at,
            },
            created_at,
        )
    }

    #[test]
    fn stock_is_classified_against_each_critical_level() {
        // O- critical level 20: 6 -> critical, 12 -> low, 13 -> good
        let levels = classify_stock(&[stock("O-", 6), stock("O-", 12), stock("O-", 13)]);
        assert_eq!(levels.critical_count, 1);
        assert_eq!(levels.low_count, 1);
        assert_eq!(levels.good_count, 1);
        assert_eq!(levels.critical[0].critical_level, 20);
        assert_eq!(levels.good[0].status, StockStatus::Good);

        // unknown types use 15
        let levels = classify_stock(&[stock("Unknown", 4)]);
        assert_eq!(levels.critical[0].critical_level, 15);
    }

    #[test]
    fn health_score_penalises_critical_and_low_types() {
        let levels = classify_stock(&[stock("AB-", 1), stock("AB+", 5), stock("O+", 80)]);
        assert_eq!(health_score(3, &levels), 70);

        let all_critical: Vec<BloodTypeStock> =
            BloodType::ALL.iter().map(|t| stock(t.as_str(), 0)).collect();
        let levels = classify_stock(&all_critical);
        assert_eq!(health_score(all_critical.len(), &levels), 0);

        assert_eq!(health_score(0, &StockLevelsDTO::default()), 0);
    }

    #[test]
    fn history_stats_count_actions_and_units() {
        let items = vec![
            change(1, "A+", "add", 10, 15),
            change(2, "O-", "subtract", 8, 5),
            change(3, "A+", "expired", 15, 13),
            change(4, "B+", "set", 0, 9),
            change(5, "O-", "add", 5, 6),
        ];
        let stats = history_stats(&items, 14);
        assert_eq!(
            stats,
            HistoryStatsDTO {
                total_changes: 5,
                additions: 2,
                removals: 1,
                updates: 1,
                expirations: 1,
                period_days: 14,
                blood_types_affected: vec!["A+".into(), "O-".into(), "B+".into()],
                total_units_added: 6,
                total_units_removed: 5,
            }
        );
    }

    #[test]
    fn update_messages_follow_the_action() {
        assert_eq!(
            update_message(&InventoryAction::Add, 5, BloodType::OPositive),
            "Added 5 units of O+ blood to inventory"
        );
        assert_eq!(
            update_message(&InventoryAction::Subtract, 2, BloodType::AbNegative),
            "Removed 2 units of AB- blood from inventory"
        );
        assert_eq!(
            update_message(&InventoryAction::Set, 30, BloodType::BPositive),
            "Set B+ blood inventory to 30 units"
        );
    }

    #[test]
    fn echo_row_reports_requested_units() {
        let row = echo_row(BloodType::ANegative, Some(3), 12);
        assert_eq!(row.units_available, 12);
        assert_eq!(row.blood_type, "A-");
        assert_eq!(row.hospital_id, Some(3));
    }
}

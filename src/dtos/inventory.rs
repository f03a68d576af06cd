//! Inventory DTOs - update request/response, stock statistics and history items

use crate::core::format;
use crate::entities::{
    BloodInventory, BloodType, BloodTypeStock, HistoryAction, InventoryAction,
    InventoryActivityPayload, InventoryActivityRow, InventoryHistoryRow, StockStatus,
    enums::ActionInfo,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /inventory/update`
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct UpdateInventoryDTO {
    #[validate(
        required(message = "Blood type and units are required"),
        custom(function = "validate_blood_type")
    )]
    pub blood_type: Option<String>,
    #[validate(
        required(message = "Blood type and units are required"),
        custom(function = "validate_units")
    )]
    pub units: Option<i64>,
    pub action: Option<String>,
    pub hospital_id: Option<i32>,
    pub modified_by: Option<i32>,
    #[validate(length(max = 255, message = "Reason must be at most 255 characters"))]
    pub reason: Option<String>,
}

fn validate_blood_type(value: &str) -> Result<(), ValidationError> {
    if BloodType::parse(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("blood_type");
    err.message = Some("Invalid blood type".into());
    Err(err)
}

/// Stored quantities are `INT` columns.
const MAX_UNITS: i64 = i32::MAX as i64;

fn validate_units(value: i64) -> Result<(), ValidationError> {
    let message = if value < 0 {
        "Units cannot be negative"
    } else if value > MAX_UNITS {
        "Units cannot exceed 2147483647"
    } else {
        return Ok(());
    };
    let mut err = ValidationError::new("units");
    err.message = Some(message.into());
    Err(err)
}

impl UpdateInventoryDTO {
    /// Zero or a negative id means "no hospital", like the query-side filters.
    pub fn hospital(&self) -> Option<i32> {
        self.hospital_id.filter(|id| *id > 0)
    }
}

#[derive(Serialize, Debug)]
pub struct InventoryUpdateDTO {
    pub blood_type: BloodType,
    pub units: i64,
    pub action: InventoryAction,
    pub hospital_id: Option<i32>,
    pub previous_quantity: i64,
    pub final_quantity: i64,
    pub updated_inventory: Vec<BloodInventory>,
    pub timestamp: String,
}

// ************************* STATISTICS ************************* //

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StockLevelDTO {
    pub blood_type: String,
    pub quantity: i64,
    pub critical_level: i64,
    pub status: StockStatus,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct StockLevelsDTO {
    pub critical: Vec<StockLevelDTO>,
    pub low: Vec<StockLevelDTO>,
    pub good: Vec<StockLevelDTO>,
    pub critical_count: usize,
    pub low_count: usize,
    pub good_count: usize,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct InventorySummaryDTO {
    pub total_units: i64,
    pub blood_types_available: i64,
    pub average_units_per_type: f64,
    pub lowest_stock: i64,
    pub highest_stock: i64,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct ActivityCountsDTO {
    pub period_days: i64,
    pub total_activities: i64,
    pub inventory_updates: i64,
    pub donations: i64,
    pub requests: i64,
}

#[derive(Serialize, Debug, Clone)]
pub struct InventoryTrendsDTO {
    pub inventory_trend: &'static str,
    pub activity_trend: &'static str,
    pub critical_trend: &'static str,
}

#[derive(Serialize, Debug, Clone)]
pub struct InventoryStatsDTO {
    pub summary: InventorySummaryDTO,
    pub by_blood_type: Vec<BloodTypeStock>,
    pub stock_levels: StockLevelsDTO,
    pub activity: ActivityCountsDTO,
    pub health_score: i64,
    pub trends: InventoryTrendsDTO,
}

// ************************* HISTORY ************************* //

#[derive(Serialize, Debug, Clone)]
pub struct HistoryItemDTO {
    pub id: i32,
    pub blood_type: String,
    pub action: String,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub change_amount: i64,
    pub reason: Option<String>,
    pub hospital_id: Option<i32>,
    pub hospital_name: Option<String>,
    pub modified_by: Option<i32>,
    pub modified_by_name: Option<String>,
    pub created_at: String,
    pub created_formatted: String,
    pub date_only: String,
    pub time_only: String,
    pub action_info: ActionInfo,
    pub time_ago: String,
    pub change_indicator: String,
}

/// Plain history fields before display decoration
struct HistoryFields {
    id: i32,
    blood_type: String,
    action: String,
    previous_quantity: i64,
    new_quantity: i64,
    change_amount: i64,
    reason: Option<String>,
    hospital_id: Option<i32>,
    hospital_name: Option<String>,
    modified_by: Option<i32>,
    modified_by_name: Option<String>,
    created_at: NaiveDateTime,
}

impl HistoryItemDTO {
    pub fn from_history(row: InventoryHistoryRow, now: NaiveDateTime) -> Self {
        Self::decorate(
            HistoryFields {
                id: row.id,
                blood_type: row.blood_type,
                action: row.action,
                previous_quantity: i64::from(row.previous_quantity),
                new_quantity: i64::from(row.new_quantity),
                change_amount: i64::from(row.change_amount),
                reason: row.reason,
                hospital_id: row.hospital_id,
                hospital_name: row.hospital_name,
                modified_by: row.modified_by,
                modified_by_name: row.modified_by_name,
                created_at: row.created_at,
            },
            now,
        )
    }

    /// Rebuilds a history item from the JSON payload of an `inventory_update`
    /// activity. Missing or unreadable payload fields take neutral defaults.
    pub fn from_activity(row: InventoryActivityRow, now: NaiveDateTime) -> Self {
        let payload: InventoryActivityPayload = row
            .activity_data
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        let previous_quantity = payload.previous_quantity.unwrap_or(0);
        let new_quantity = payload.new_quantity.or(payload.units).unwrap_or(0);

        Self::decorate(
            HistoryFields {
                id: row.id,
                blood_type: payload.blood_type.unwrap_or_else(|| "Unknown".to_string()),
                action: payload.action.unwrap_or_else(|| "update".to_string()),
                previous_quantity,
                new_quantity,
                change_amount: new_quantity - previous_quantity,
                reason: Some(payload.reason.unwrap_or_else(|| "Inventory update".to_string())),
                hospital_id: row.hospital_id,
                hospital_name: row.hospital_name,
                modified_by: row.user_id,
                modified_by_name: Some(row.modified_by_name.unwrap_or_else(|| "System".to_string())),
                created_at: row.created_at,
            },
            now,
        )
    }

    fn decorate(fields: HistoryFields, now: NaiveDateTime) -> Self {
        let change_indicator = match fields.change_amount {
            n if n > 0 => format!("+{}", n),
            n if n < 0 => n.to_string(),
            _ => String::new(),
        };

        Self {
            action_info: HistoryAction::info_for(&fields.action),
            created_formatted: format::long_datetime(fields.created_at),
            date_only: fields.created_at.date().format("%Y-%m-%d").to_string(),
            time_only: format::clock_time(fields.created_at.time()),
            time_ago: format::time_ago(fields.created_at, now),
            created_at: format::sql_datetime(fields.created_at),
            change_indicator,
            id: fields.id,
            blood_type: fields.blood_type,
            action: fields.action,
            previous_quantity: fields.previous_quantity,
            new_quantity: fields.new_quantity,
            change_amount: fields.change_amount,
            reason: fields.reason,
            hospital_id: fields.hospital_id,
            hospital_name: fields.hospital_name,
            modified_by: fields.modified_by,
            modified_by_name: fields.modified_by_name,
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct HistoryStatsDTO {
    pub total_changes: usize,
    pub additions: usize,
    pub removals: usize,
    pub updates: usize,
    pub expirations: usize,
    pub period_days: i64,
    pub blood_types_affected: Vec<String>,
    pub total_units_added: i64,
    pub total_units_removed: i64,
}

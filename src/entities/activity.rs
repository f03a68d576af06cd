//! Audit trail: inventory_history and hospital_activities

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InventoryHistoryRow {
    pub id: i32,
    pub blood_type: String,
    pub action: String,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub change_amount: i32,
    pub reason: Option<String>,
    pub hospital_id: Option<i32>,
    pub hospital_name: Option<String>,
    pub modified_by: Option<i32>,
    pub modified_by_name: Option<String>,
    pub created_at: NaiveDateTime,
}

/// An `inventory_update` row of hospital_activities
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InventoryActivityRow {
    pub id: i32,
    pub hospital_id: Option<i32>,
    pub user_id: Option<i32>,
    pub activity_data: Option<String>,
    pub hospital_name: Option<String>,
    pub modified_by_name: Option<String>,
    pub created_at: NaiveDateTime,
}

/// JSON stored in `hospital_activities.activity_data` for inventory updates.
/// Every field is optional because older rows carry only part of it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InventoryActivityPayload {
    pub blood_type: Option<String>,
    pub units: Option<i64>,
    pub action: Option<String>,
    pub previous_quantity: Option<i64>,
    pub new_quantity: Option<i64>,
    pub reason: Option<String>,
}

/// Activity counts over a period, by activity type
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct ActivityCounts {
    pub total_activities: i64,
    pub inventory_updates: i64,
    pub donations: i64,
    pub requests: i64,
}

/// Audit record written after an inventory change
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub hospital_id: Option<i32>,
    pub blood_type: String,
    pub action: String,
    pub units: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub reason: Option<String>,
    pub modified_by: Option<i32>,
}

impl NewHistoryEntry {
    pub fn change_amount(&self) -> i64 {
        self.new_quantity - self.previous_quantity
    }

    pub fn payload(&self) -> InventoryActivityPayload {
        InventoryActivityPayload {
            blood_type: Some(self.blood_type.clone()),
            units: Some(self.units),
            action: Some(self.action.clone()),
            previous_quantity: Some(self.previous_quantity),
            new_quantity: Some(self.new_quantity),
            reason: self.reason.clone(),
        }
    }
}

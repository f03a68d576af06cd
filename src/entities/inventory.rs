//! Blood inventory entity and the quantity resolver

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BloodInventory {
    pub id: i32,
    pub hospital_id: Option<i32>,
    pub blood_type: String,
    pub units_available: i32,
    pub units_required: i32,
    pub units_reserved: i32,
    #[serde(serialize_with = "crate::entities::serialize_sql_datetime")]
    pub last_updated: NaiveDateTime,
}

/// Per blood type aggregate over every location holding it
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BloodTypeStock {
    pub blood_type: String,
    pub total_units: i64,
    pub avg_units: f64,
    pub locations: i64,
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct InventorySummary {
    pub blood_types_available: i64,
    pub total_units: i64,
    pub average_units_per_type: f64,
    pub lowest_stock: i64,
    pub highest_stock: i64,
}

/// System-wide totals for the admin dashboard
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct InventoryTotals {
    pub total_available: i64,
    pub total_required: i64,
    pub hospitals_with_inventory: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BloodTypeUnits {
    pub blood_type: String,
    pub total_units: i64,
}

/// How a requested unit count is applied to the stored quantity.
///
/// Anything other than `set`, `add` or `subtract` is kept verbatim as
/// [`InventoryAction::Unknown`] and leaves the quantity untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryAction {
    Set,
    Add,
    Subtract,
    Unknown(String),
}

impl InventoryAction {
    /// A missing action means `set`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("set") => InventoryAction::Set,
            Some("add") => InventoryAction::Add,
            Some("subtract") => InventoryAction::Subtract,
            Some(other) => InventoryAction::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InventoryAction::Set => "set",
            InventoryAction::Add => "add",
            InventoryAction::Subtract => "subtract",
            InventoryAction::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, InventoryAction::Unknown(_))
    }

    /// New stored quantity for a row currently holding `current` units.
    /// Subtraction floors at zero.
    pub fn resolve(&self, current: i64, requested: i64) -> i64 {
        match self {
            InventoryAction::Set => requested,
            InventoryAction::Add => current.saturating_add(requested),
            InventoryAction::Subtract => current.saturating_sub(requested).max(0),
            InventoryAction::Unknown(_) => current,
        }
    }
}

impl Serialize for InventoryAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

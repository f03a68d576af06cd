//! Entities module - rows read from and written to the database
//!
//! Each submodule covers one table, plus the joined or aggregated
//! projections the endpoints read from it.

pub mod activity;
pub mod appointment;
pub mod campaign;
pub mod donation;
pub mod enums;
pub mod hospital;
pub mod inventory;
pub mod request;
pub mod user;

pub use activity::{
    ActivityCounts, InventoryActivityPayload, InventoryActivityRow, InventoryHistoryRow,
    NewHistoryEntry,
};
pub use appointment::AppointmentRow;
pub use campaign::{
    CampaignCounts, CampaignDetailRow, CampaignDonationRow, CampaignListRow, TimelineRow,
};
pub use donation::{DailyDonationCount, DonationActivityRow};
pub use enums::{
    AppointmentStatus, BloodType, HistoryAction, RequestStatus, StockStatus, UrgencyLevel,
    UserRole,
};
pub use hospital::HospitalApproval;
pub use inventory::{
    BloodInventory, BloodTypeStock, BloodTypeUnits, InventoryAction, InventorySummary,
    InventoryTotals,
};
pub use request::{EmergencyRequestRow, RequestActivityRow};
pub use user::{Donor, DonorSearchRow, RegistrationStats, RoleCount};

use chrono::NaiveDateTime;
use serde::Serializer;

/// Serializes a timestamp the way MySQL prints it (`2025-01-31 14:05:00`)
pub fn serialize_sql_datetime<S: Serializer>(
    value: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&crate::core::format::sql_datetime(*value))
}

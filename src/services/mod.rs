//! Services module - HTTP handlers, one submodule per resource
//!
//! Every read handler follows the same contract: a database failure is
//! logged and answered with a degraded envelope carrying empty data of the
//! normal shape, never with an error page.

pub mod activity;
pub mod admin;
pub mod appointment;
pub mod campaign;
pub mod donation;
pub mod donor;
pub mod inventory;
pub mod request;

pub use activity::get_hospital_activities;
pub use admin::get_admin_stats;
pub use appointment::get_appointments;
pub use campaign::{get_campaign_details, get_campaign_stats, list_campaigns};
pub use donation::get_donation_trends;
pub use donor::search_donors;
pub use inventory::{get_inventory_history, get_inventory_stats, update_inventory};
pub use request::get_emergency_requests;

use crate::dtos::ApiResponse;
use axum::Json;
use serde_json::{Value, json};
use tracing::warn;

/// Root endpoint - health check
pub async fn root() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(
        "Blood bank API is running",
        json!({ "status": "ok" }),
    ))
}

/// Unwraps a repository result, falling back to `T::default()` and raising
/// `degraded` when the query failed.
pub(crate) fn recover<T: Default>(
    result: Result<T, sqlx::Error>,
    what: &str,
    degraded: &mut bool,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!("Failed to load {}: {}", what, err);
            *degraded = true;
            T::default()
        }
    }
}

//! Blood bank server library - exposes the router and modules for tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

pub use core::{AppError, AppState, config};
pub use services::root;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api", configure_api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/admin", configure_admin_routes())
        .route("/appointments", get(services::get_appointments))
        .nest("/campaigns", configure_campaign_routes())
        .route("/requests/emergency", get(services::get_emergency_requests))
        .route("/hospitals/activities", get(services::get_hospital_activities))
        .route("/donations/trends", get(services::get_donation_trends))
        .nest("/inventory", configure_inventory_routes())
        .route("/donors/search", get(services::search_donors))
}

/// Admin dashboard. Not authenticated: access control sits in front of the service.
fn configure_admin_routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(services::get_admin_stats))
}

fn configure_campaign_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_campaigns))
        .route("/details", get(get_campaign_details))
        .route("/stats", get(get_campaign_stats))
}

fn configure_inventory_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/update", post(update_inventory))
        .route("/history", get(get_inventory_history))
        .route("/stats", get(get_inventory_stats))
}

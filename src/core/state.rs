//! Application State - shared by every route
//!
//! Holds one repository per table group, all built on the same MySQL pool.

use crate::repositories::{
    ActivityRepository, AppointmentRepository, CampaignRepository, DonationRepository,
    HospitalRepository, InventoryRepository, RequestRepository, SystemRepository, UserRepository,
};
use sqlx::MySqlPool;
use std::time::Instant;

pub struct AppState {
    pub user: UserRepository,

    pub hospital: HospitalRepository,

    pub inventory: InventoryRepository,

    pub campaign: CampaignRepository,

    pub donation: DonationRepository,

    /// Blood requests (emergency and routine)
    pub request: RequestRepository,

    pub appointment: AppointmentRepository,

    /// Audit trail: inventory_history and hospital_activities
    pub activity: ActivityRepository,

    pub system: SystemRepository,

    /// Process start, reported as uptime by the admin dashboard
    pub started_at: Instant,
}

impl AppState {
    /// Builds every repository on top of the given pool.
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool shared by all repositories
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            hospital: HospitalRepository::new(pool.clone()),
            inventory: InventoryRepository::new(pool.clone()),
            campaign: CampaignRepository::new(pool.clone()),
            donation: DonationRepository::new(pool.clone()),
            request: RequestRepository::new(pool.clone()),
            appointment: AppointmentRepository::new(pool.clone()),
            activity: ActivityRepository::new(pool.clone()),
            system: SystemRepository::new(pool),
            started_at: Instant::now(),
        }
    }
}

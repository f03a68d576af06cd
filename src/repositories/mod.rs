//! Repositories module - one repository per table group
//!
//! Every repository owns a clone of the shared MySQL pool and returns
//! `Result<_, sqlx::Error>`; deciding what a failure means is left to the
//! services.
//!
//! Queries are checked at runtime (`sqlx::query_as::<_, Row>` with
//! `#[derive(sqlx::FromRow)]` rows) so the crate builds without a live
//! database. MySQL returns DECIMAL for `SUM` and `AVG`, hence the
//! `CAST(... AS SIGNED)` / `CAST(... AS DOUBLE)` wrappers around them.

pub mod activity;
pub mod appointment;
pub mod campaign;
pub mod donation;
pub mod hospital;
pub mod inventory;
pub mod request;
pub mod system;
pub mod traits;
pub mod user;

pub use traits::Read;

pub use activity::{ActivityRepository, HistoryFilter};
pub use appointment::AppointmentRepository;
pub use campaign::CampaignRepository;
pub use donation::DonationRepository;
pub use hospital::HospitalRepository;
pub use inventory::{InventoryChange, InventoryRepository};
pub use request::RequestRepository;
pub use system::SystemRepository;
pub use user::UserRepository;

//! DTOs module - Data Transfer Objects
//!
//! Request bodies, query strings and the JSON shapes served to clients.
//! DTOs keep the wire format apart from the database rows in `entities`.

pub mod activity;
pub mod admin;
pub mod appointment;
pub mod campaign;
pub mod donation;
pub mod donor;
pub mod envelope;
pub mod inventory;
pub mod query;
pub mod request;

pub use activity::{ActivityItemDTO, ActivityStatsDTO};
pub use admin::{AdminStatsDTO, SystemHealthDTO};
pub use appointment::{AppointmentDTO, AppointmentStatsDTO, AppointmentsDTO};
pub use campaign::{
    CampaignDTO, CampaignDetailDTO, CampaignDetailsDTO, CampaignDonationDTO, CampaignMetricsDTO,
    CampaignStatsDTO, TimelineEntryDTO,
};
pub use donation::{
    BloodTypeChartDTO, DailyChartDTO, DonationTrendsDTO, TrendPeriodDTO, TrendStatisticsDTO,
};
pub use donor::{DonorDTO, DonorSearchStatsDTO};
pub use envelope::{ApiResponse, DEGRADED_MESSAGE};
pub use inventory::{
    ActivityCountsDTO, HistoryItemDTO, HistoryStatsDTO, InventoryStatsDTO, InventorySummaryDTO,
    InventoryTrendsDTO, InventoryUpdateDTO, StockLevelDTO, StockLevelsDTO, UpdateInventoryDTO,
};
pub use query::{
    AppointmentsQuery, CampaignDetailsQuery, CampaignListQuery, CampaignStatsQuery,
    DonationTrendsQuery, DonorSearchQuery, EmergencyRequestsQuery, HospitalActivitiesQuery,
    InventoryHistoryQuery, InventoryStatsQuery,
};
pub use request::{EmergencyRequestDTO, EmergencyStatsDTO};

//! HospitalRepository - hospital registration counts

use crate::entities::HospitalApproval;
use sqlx::{Error, MySqlPool};

pub struct HospitalRepository {
    connection_pool: MySqlPool,
}

impl HospitalRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Total registered hospitals and how many of them are approved
    pub async fn approval_counts(&self) -> Result<HospitalApproval, Error> {
        sqlx::query_as::<_, HospitalApproval>(
            "SELECT
                COUNT(*) AS total,
                CAST(COALESCE(SUM(CASE WHEN is_approved = 1 THEN 1 ELSE 0 END), 0) AS SIGNED) AS approved,
                CAST(COALESCE(SUM(CASE WHEN is_approved = 0 THEN 1 ELSE 0 END), 0) AS SIGNED) AS pending
             FROM hospitals",
        )
        .fetch_one(&self.connection_pool)
        .await
    }
}

//! DonationRepository - donation counts and the donation side of the activity feed

use crate::entities::{BloodType, DailyDonationCount, DonationActivityRow};
use chrono::NaiveDate;
use sqlx::{Error, MySql, MySqlPool, QueryBuilder};

pub struct DonationRepository {
    connection_pool: MySqlPool,
}

impl DonationRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Donations per day and blood type since `since` (inclusive)
    pub async fn daily_counts(
        &self,
        since: NaiveDate,
        hospital_id: Option<i32>,
        blood_type: Option<BloodType>,
    ) -> Result<Vec<DailyDonationCount>, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                DATE(created_at) AS donation_day,
                blood_type,
                COUNT(*) AS donation_count
             FROM donations
             WHERE created_at >= ",
        );
        builder.push_bind(since);
        if let Some(hospital_id) = hospital_id {
            builder.push(" AND hospital_id = ").push_bind(hospital_id);
        }
        if let Some(blood_type) = blood_type {
            builder.push(" AND blood_type = ").push_bind(blood_type.as_str());
        }
        builder.push(" GROUP BY DATE(created_at), blood_type ORDER BY donation_day");

        builder
            .build_query_as::<DailyDonationCount>()
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Latest donations with donor and hospital names
    pub async fn recent_activity(
        &self,
        hospital_id: Option<i32>,
        limit: i64,
    ) -> Result<Vec<DonationActivityRow>, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                d.id,
                COALESCE(d.donation_date, d.created_at) AS activity_date,
                d.blood_type,
                d.quantity,
                d.status,
                u.full_name AS donor_name,
                h.hospital_name
             FROM donations d
             LEFT JOIN users u ON d.donor_id = u.id
             LEFT JOIN hospitals h ON d.hospital_id = h.id",
        );
        if let Some(hospital_id) = hospital_id {
            builder.push(" WHERE d.hospital_id = ").push_bind(hospital_id);
        }
        builder
            .push(" ORDER BY activity_date DESC LIMIT ")
            .push_bind(limit);

        builder
            .build_query_as::<DonationActivityRow>()
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Donations created in the last `days` days
    pub async fn count_since(&self, days: i64) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM donations WHERE created_at >= DATE_SUB(NOW(), INTERVAL ? DAY)",
        )
        .bind(days)
        .fetch_one(&self.connection_pool)
        .await
    }
}

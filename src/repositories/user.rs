//! UserRepository - donors and user counts

use super::Read;
use crate::entities::{BloodType, Donor, DonorSearchRow, RegistrationStats, RoleCount, UserRole};
use sqlx::{Error, MySql, MySqlPool, QueryBuilder};

pub struct UserRepository {
    connection_pool: MySqlPool,
}

impl UserRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Active users grouped by role
    pub async fn count_active_by_role(&self) -> Result<Vec<RoleCount>, Error> {
        sqlx::query_as::<_, RoleCount>(
            "SELECT CAST(role AS CHAR) AS role, COUNT(*) AS count
             FROM users
             WHERE is_active = 1
             GROUP BY role",
        )
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Users registered in the last `days` days, split by role
    pub async fn registrations_since(&self, days: i64) -> Result<RegistrationStats, Error> {
        sqlx::query_as::<_, RegistrationStats>(
            "SELECT
                COUNT(*) AS recent_registrations,
                CAST(COALESCE(SUM(CASE WHEN role = 'donor' THEN 1 ELSE 0 END), 0) AS SIGNED) AS recent_donors,
                CAST(COALESCE(SUM(CASE WHEN role = 'hospital' THEN 1 ELSE 0 END), 0) AS SIGNED) AS recent_hospitals
             FROM users
             WHERE created_at >= DATE_SUB(NOW(), INTERVAL ? DAY)",
        )
        .bind(days)
        .fetch_one(&self.connection_pool)
        .await
    }

    pub async fn count_by_role(&self, role: UserRole) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = ?")
            .bind(role.as_str())
            .fetch_one(&self.connection_pool)
            .await
    }

    /// Active donors whose name, email or phone contains `query`,
    /// optionally restricted to one blood type, ordered by name.
    pub async fn search_donors(
        &self,
        query: Option<&str>,
        blood_type: Option<BloodType>,
        limit: i64,
    ) -> Result<Vec<DonorSearchRow>, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                u.id,
                u.full_name,
                u.email,
                u.phone,
                u.blood_type,
                u.city,
                u.state,
                u.is_eligible,
                u.last_donation_date,
                COUNT(d.id) AS total_donations,
                MAX(d.donation_date) AS last_donation
             FROM users u
             LEFT JOIN donations d ON u.id = d.donor_id
             WHERE u.role = 'donor' AND u.is_active = 1",
        );

        if let Some(query) = query {
            let pattern = format!("%{}%", query);
            builder
                .push(" AND (u.full_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR u.email LIKE ")
                .push_bind(pattern.clone())
                .push(" OR u.phone LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(blood_type) = blood_type {
            builder.push(" AND u.blood_type = ").push_bind(blood_type.as_str());
        }

        builder
            .push(" GROUP BY u.id ORDER BY u.full_name LIMIT ")
            .push_bind(limit);

        builder
            .build_query_as::<DonorSearchRow>()
            .fetch_all(&self.connection_pool)
            .await
    }
}

/// Reads an active donor; hospitals, admins and inactive users are not found.
impl Read<Donor, i32> for UserRepository {
    async fn read(&self, id: &i32) -> Result<Option<Donor>, Error> {
        sqlx::query_as::<_, Donor>(
            "SELECT id, full_name FROM users WHERE id = ? AND role = 'donor' AND is_active = 1",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

//! RequestRepository - blood requests

use crate::entities::{EmergencyRequestRow, RequestActivityRow};
use sqlx::{Error, MySql, MySqlPool, QueryBuilder};

pub struct RequestRepository {
    connection_pool: MySqlPool,
}

impl RequestRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Requests with urgency high or above, most urgent first and newest
    /// first within the same urgency.
    pub async fn emergency(
        &self,
        status: Option<&str>,
        limit: i64,
    ) -> Result<Vec<EmergencyRequestRow>, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                r.id,
                r.blood_type,
                r.units_needed,
                CAST(r.urgency_level AS CHAR) AS urgency_level,
                CAST(r.status AS CHAR) AS status,
                r.description AS notes,
                r.location,
                r.contact_person,
                r.phone,
                r.created_at,
                r.updated_at,
                h.hospital_name,
                h.address AS hospital_address
             FROM requests r
             LEFT JOIN hospitals h ON r.hospital_id = h.id
             WHERE r.urgency_level IN ('high', 'critical', 'emergency')",
        );
        if let Some(status) = status {
            builder.push(" AND r.status = ").push_bind(status.to_string());
        }
        builder
            .push(
                " ORDER BY
                    CASE r.urgency_level
                        WHEN 'emergency' THEN 1
                        WHEN 'critical' THEN 2
                        WHEN 'high' THEN 3
                        ELSE 4
                    END,
                    r.created_at DESC
                  LIMIT ",
            )
            .push_bind(limit);

        builder
            .build_query_as::<EmergencyRequestRow>()
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Latest requests with the requesting hospital's name
    pub async fn recent_activity(&self, limit: i64) -> Result<Vec<RequestActivityRow>, Error> {
        sqlx::query_as::<_, RequestActivityRow>(
            "SELECT
                r.id,
                r.created_at AS activity_date,
                r.blood_type,
                r.units_needed,
                CAST(r.status AS CHAR) AS status,
                CAST(r.urgency_level AS CHAR) AS urgency_level,
                h.hospital_name
             FROM requests r
             LEFT JOIN hospitals h ON r.hospital_id = h.id
             ORDER BY r.created_at DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.connection_pool)
        .await
    }
}

//! ActivityRepository - inventory audit trail and hospital activity log

use crate::entities::{ActivityCounts, InventoryActivityRow, InventoryHistoryRow, NewHistoryEntry};
use sqlx::{Error, MySql, MySqlPool, QueryBuilder};

/// Filters of an inventory history read
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub days: i64,
    pub hospital_id: Option<i32>,
    pub blood_type: Option<String>,
    pub action: Option<String>,
    pub limit: i64,
}

pub struct ActivityRepository {
    connection_pool: MySqlPool,
}

impl ActivityRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// inventory_history rows matching `filter`, newest first
    pub async fn history(&self, filter: &HistoryFilter) -> Result<Vec<InventoryHistoryRow>, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                ih.id,
                ih.blood_type,
                ih.action,
                ih.previous_quantity,
                ih.new_quantity,
                ih.change_amount,
                ih.reason,
                ih.hospital_id,
                h.hospital_name,
                ih.modified_by,
                u.full_name AS modified_by_name,
                ih.created_at
             FROM inventory_history ih
             LEFT JOIN users u ON ih.modified_by = u.id
             LEFT JOIN hospitals h ON ih.hospital_id = h.id
             WHERE ih.created_at >= DATE_SUB(NOW(), INTERVAL ",
        );
        builder.push_bind(filter.days).push(" DAY)");
        if let Some(hospital_id) = filter.hospital_id {
            builder.push(" AND ih.hospital_id = ").push_bind(hospital_id);
        }
        if let Some(blood_type) = &filter.blood_type {
            builder.push(" AND ih.blood_type = ").push_bind(blood_type.clone());
        }
        if let Some(action) = &filter.action {
            builder.push(" AND ih.action = ").push_bind(action.clone());
        }
        builder
            .push(" ORDER BY ih.created_at DESC LIMIT ")
            .push_bind(filter.limit);

        builder
            .build_query_as::<InventoryHistoryRow>()
            .fetch_all(&self.connection_pool)
            .await
    }

    /// `inventory_update` rows of hospital_activities matching `filter`, newest first.
    /// Blood type and action are read from the JSON payload, with the same
    /// defaults the history view applies to payloads that lack them.
    pub async fn inventory_activities(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<InventoryActivityRow>, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                ha.id,
                ha.hospital_id,
                ha.user_id,
                ha.activity_data,
                h.hospital_name,
                u.full_name AS modified_by_name,
                ha.created_at
             FROM hospital_activities ha
             LEFT JOIN users u ON ha.user_id = u.id
             LEFT JOIN hospitals h ON ha.hospital_id = h.id
             WHERE ha.activity_type = 'inventory_update'
               AND ha.created_at >= DATE_SUB(NOW(), INTERVAL ",
        );
        builder.push_bind(filter.days).push(" DAY)");
        if let Some(hospital_id) = filter.hospital_id {
            builder.push(" AND ha.hospital_id = ").push_bind(hospital_id);
        }
        if let Some(blood_type) = &filter.blood_type {
            builder
                .push(" AND ")
                .push(payload_field("blood_type", "Unknown"))
                .push(" = ")
                .push_bind(blood_type.clone());
        }
        if let Some(action) = &filter.action {
            builder
                .push(" AND ")
                .push(payload_field("action", "update"))
                .push(" = ")
                .push_bind(action.clone());
        }
        builder
            .push(" ORDER BY ha.created_at DESC LIMIT ")
            .push_bind(filter.limit);

        builder
            .build_query_as::<InventoryActivityRow>()
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Activity counts by type over the last `days` days
    pub async fn counts_since(
        &self,
        days: i64,
        hospital_id: Option<i32>,
    ) -> Result<ActivityCounts, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                COUNT(*) AS total_activities,
                CAST(COALESCE(SUM(CASE WHEN activity_type = 'inventory_update' THEN 1 ELSE 0 END), 0) AS SIGNED) AS inventory_updates,
                CAST(COALESCE(SUM(CASE WHEN activity_type = 'donation' THEN 1 ELSE 0 END), 0) AS SIGNED) AS donations,
                CAST(COALESCE(SUM(CASE WHEN activity_type = 'request' THEN 1 ELSE 0 END), 0) AS SIGNED) AS requests
             FROM hospital_activities
             WHERE created_at >= DATE_SUB(NOW(), INTERVAL ",
        );
        builder.push_bind(days).push(" DAY)");
        if let Some(hospital_id) = hospital_id {
            builder.push(" AND hospital_id = ").push_bind(hospital_id);
        }

        builder
            .build_query_as::<ActivityCounts>()
            .fetch_one(&self.connection_pool)
            .await
    }

    /// Appends an inventory change to inventory_history
    pub async fn record_history(&self, entry: &NewHistoryEntry) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO inventory_history
                (hospital_id, blood_type, action, previous_quantity, new_quantity, change_amount, reason, modified_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, NOW())",
        )
        .bind(entry.hospital_id)
        .bind(&entry.blood_type)
        .bind(&entry.action)
        .bind(entry.previous_quantity)
        .bind(entry.new_quantity)
        .bind(entry.change_amount())
        .bind(&entry.reason)
        .bind(entry.modified_by)
        .execute(&self.connection_pool)
        .await?;
        Ok(())
    }

    /// Logs an inventory change as an `inventory_update` hospital activity
    /// carrying `payload` as its JSON data.
    pub async fn log_inventory_update(
        &self,
        entry: &NewHistoryEntry,
        payload: &str,
    ) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO hospital_activities (hospital_id, user_id, activity_type, activity_data, created_at)
             VALUES (?, ?, 'inventory_update', ?, NOW())",
        )
        .bind(entry.hospital_id)
        .bind(entry.modified_by)
        .bind(payload)
        .execute(&self.connection_pool)
        .await?;
        Ok(())
    }
}

/// SQL reading `key` from the activity payload. Unparseable payloads and
/// missing keys yield `fallback`.
fn payload_field(key: &str, fallback: &str) -> String {
    format!(
        "COALESCE(CASE WHEN JSON_VALID(ha.activity_data) \
         THEN JSON_UNQUOTE(JSON_EXTRACT(ha.activity_data, '$.{key}')) END, '{fallback}')"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ignore = "requires a MySQL database"]
    #[sqlx::test(fixtures(path = "../../fixtures", scripts("bloodbank")))]
    async fn recorded_history_is_read_back(pool: MySqlPool) -> sqlx::Result<()> {
        let repo = ActivityRepository::new(pool);
        let entry = NewHistoryEntry {
            hospital_id: Some(1),
            blood_type: "B-".into(),
            action: "add".into(),
            units: 4,
            previous_quantity: 6,
            new_quantity: 10,
            reason: Some("restock".into()),
            modified_by: Some(1),
        };

        repo.record_history(&entry).await?;
        repo.log_inventory_update(&entry, r#"{"blood_type":"B-","units":4}"#)
            .await?;

        let filter = HistoryFilter {
            days: 1,
            blood_type: Some("B-".into()),
            limit: 10,
            ..Default::default()
        };
        let rows = repo.history(&filter).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].change_amount, 4);

        let by_hospital = HistoryFilter {
            days: 1,
            hospital_id: Some(1),
            limit: 10,
            ..Default::default()
        };
        let activities = repo.inventory_activities(&by_hospital).await?;
        assert!(!activities.is_empty());

        let counts = repo.counts_since(1, None).await?;
        assert!(counts.inventory_updates >= 1);
        Ok(())
    }

    #[ignore = "requires a MySQL database"]
    #[sqlx::test(fixtures(path = "../../fixtures", scripts("bloodbank")))]
    async fn activity_filters_apply_before_the_limit(pool: MySqlPool) -> sqlx::Result<()> {
        let repo = ActivityRepository::new(pool);
        let entry = |blood_type: &str| NewHistoryEntry {
            hospital_id: Some(1),
            blood_type: blood_type.into(),
            action: "add".into(),
            units: 1,
            previous_quantity: 0,
            new_quantity: 1,
            reason: None,
            modified_by: None,
        };

        repo.log_inventory_update(&entry("A+"), r#"{"blood_type":"A+","action":"add"}"#)
            .await?;
        for _ in 0..3 {
            repo.log_inventory_update(&entry("B-"), r#"{"blood_type":"B-","action":"add"}"#)
                .await?;
        }
        repo.log_inventory_update(&entry("B-"), "not json").await?;

        let filter = HistoryFilter {
            days: 1,
            blood_type: Some("A+".into()),
            action: Some("add".into()),
            limit: 1,
            ..Default::default()
        };
        let rows = repo.inventory_activities(&filter).await?;
        assert_eq!(rows.len(), 1);
        assert!(rows[0].activity_data.as_deref().is_some_and(|data| data.contains("A+")));

        let unknown = HistoryFilter {
            days: 1,
            blood_type: Some("Unknown".into()),
            limit: 10,
            ..Default::default()
        };
        assert_eq!(repo.inventory_activities(&unknown).await?.len(), 1);
        Ok(())
    }

    #[test]
    fn payload_field_reads_json_with_a_fallback() {
        let sql = payload_field("action", "update");
        assert!(sql.contains("JSON_EXTRACT(ha.activity_data, '$.action')"));
        assert!(sql.ends_with(", 'update')"));
    }
}

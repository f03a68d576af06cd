//! InventoryRepository - blood stock reads and the locked update

use crate::entities::{
    BloodInventory, BloodType, BloodTypeStock, BloodTypeUnits, InventoryAction, InventorySummary,
    InventoryTotals,
};
use sqlx::{Error, MySql, MySqlConnection, MySqlPool, QueryBuilder};
use tracing::debug;

/// Outcome of [`InventoryRepository::apply_update`]
#[derive(Debug, Clone)]
pub struct InventoryChange {
    /// Units held across the matched rows before the update
    pub previous_quantity: i64,
    /// Units held across the matched rows after the update
    pub final_quantity: i64,
    /// Matched rows as read back after the update
    pub rows: Vec<BloodInventory>,
}

pub struct InventoryRepository {
    connection_pool: MySqlPool,
}

impl InventoryRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Units per blood type, optionally for one hospital only
    pub async fn stock_by_blood_type(
        &self,
        hospital_id: Option<i32>,
    ) -> Result<Vec<BloodTypeStock>, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                blood_type,
                CAST(COALESCE(SUM(units_available), 0) AS SIGNED) AS total_units,
                CAST(COALESCE(AVG(units_available), 0) AS DOUBLE) AS avg_units,
                COUNT(*) AS locations
             FROM blood_inventory",
        );
        if let Some(hospital_id) = hospital_id {
            builder.push(" WHERE hospital_id = ").push_bind(hospital_id);
        }
        builder.push(" GROUP BY blood_type ORDER BY blood_type");

        builder
            .build_query_as::<BloodTypeStock>()
            .fetch_all(&self.connection_pool)
            .await
    }

    pub async fn summary(&self, hospital_id: Option<i32>) -> Result<InventorySummary, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                COUNT(DISTINCT blood_type) AS blood_types_available,
                CAST(COALESCE(SUM(units_available), 0) AS SIGNED) AS total_units,
                CAST(COALESCE(AVG(units_available), 0) AS DOUBLE) AS average_units_per_type,
                CAST(COALESCE(MIN(units_available), 0) AS SIGNED) AS lowest_stock,
                CAST(COALESCE(MAX(units_available), 0) AS SIGNED) AS highest_stock
             FROM blood_inventory",
        );
        if let Some(hospital_id) = hospital_id {
            builder.push(" WHERE hospital_id = ").push_bind(hospital_id);
        }

        builder
            .build_query_as::<InventorySummary>()
            .fetch_one(&self.connection_pool)
            .await
    }

    /// System-wide available and required units
    pub async fn totals(&self) -> Result<InventoryTotals, Error> {
        sqlx::query_as::<_, InventoryTotals>(
            "SELECT
                CAST(COALESCE(SUM(units_available), 0) AS SIGNED) AS total_available,
                CAST(COALESCE(SUM(units_required), 0) AS SIGNED) AS total_required,
                COUNT(DISTINCT hospital_id) AS hospitals_with_inventory
             FROM blood_inventory",
        )
        .fetch_one(&self.connection_pool)
        .await
    }

    /// Units per blood type, largest stock first
    pub async fn distribution(&self) -> Result<Vec<BloodTypeUnits>, Error> {
        sqlx::query_as::<_, BloodTypeUnits>(
            "SELECT blood_type, CAST(COALESCE(SUM(units_available), 0) AS SIGNED) AS total_units
             FROM blood_inventory
             GROUP BY blood_type
             ORDER BY total_units DESC",
        )
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Applies `action` to every row of `blood_type` (restricted to one
    /// hospital when given) inside a single transaction.
    ///
    /// For a known action on one hospital the row is upserted before any
    /// lock is taken, so concurrent first updates of the same key queue on
    /// that row instead of deadlocking on a gap lock. Matched rows are then
    /// locked with `FOR UPDATE`, each new quantity is resolved from the
    /// locked value, and the rows are read back before commit. Without a
    /// hospital, a row holding `action.resolve(0, units)` is inserted when
    /// nothing matches.
    pub async fn apply_update(
        &self,
        blood_type: BloodType,
        hospital_id: Option<i32>,
        action: &InventoryAction,
        units: i64,
    ) -> Result<InventoryChange, Error> {
        let mut tx = self.connection_pool.begin().await?;

        if let Some(hospital_id) = hospital_id.filter(|_| action.is_known()) {
            sqlx::query(
                "INSERT INTO blood_inventory (blood_type, hospital_id, units_available, last_updated)
                 VALUES (?, ?, 0, NOW())
                 ON DUPLICATE KEY UPDATE id = id",
            )
            .bind(blood_type.as_str())
            .bind(hospital_id)
            .execute(&mut *tx)
            .await?;
        }

        let locked = select_rows(&mut tx, blood_type, hospital_id, true).await?;
        let previous_quantity: i64 = locked.iter().map(|row| i64::from(row.units_available)).sum();

        if locked.is_empty() {
            if action.is_known() {
                // NULL hospital ids never collide on the unique key
                debug!("No {} inventory row, inserting one", blood_type);
                sqlx::query(
                    "INSERT INTO blood_inventory (blood_type, hospital_id, units_available, last_updated)
                     VALUES (?, NULL, ?, NOW())",
                )
                .bind(blood_type.as_str())
                .bind(action.resolve(0, units))
                .execute(&mut *tx)
                .await?;
            }
        } else if action.is_known() {
            for row in &locked {
                sqlx::query(
                    "UPDATE blood_inventory SET units_available = ?, last_updated = NOW() WHERE id = ?",
                )
                .bind(action.resolve(i64::from(row.units_available), units))
                .bind(row.id)
                .execute(&mut *tx)
                .await?;
            }
        }

        let rows = select_rows(&mut tx, blood_type, hospital_id, false).await?;
        tx.commit().await?;

        let final_quantity = rows.iter().map(|row| i64::from(row.units_available)).sum();
        Ok(InventoryChange {
            previous_quantity,
            final_quantity,
            rows,
        })
    }
}

async fn select_rows(
    conn: &mut MySqlConnection,
    blood_type: BloodType,
    hospital_id: Option<i32>,
    lock: bool,
) -> Result<Vec<BloodInventory>, Error> {
    let mut builder = QueryBuilder::<MySql>::new(
        "SELECT id, hospital_id, blood_type, units_available, units_required, units_reserved, last_updated
         FROM blood_inventory
         WHERE blood_type = ",
    );
    builder.push_bind(blood_type.as_str());
    if let Some(hospital_id) = hospital_id {
        builder.push(" AND hospital_id = ").push_bind(hospital_id);
    }
    builder.push(" ORDER BY id");
    if lock {
        builder.push(" FOR UPDATE");
    }

    builder
        .build_query_as::<BloodInventory>()
        .fetch_all(conn)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ignore = "requires a MySQL database"]
    #[sqlx::test(fixtures(path = "../../fixtures", scripts("bloodbank")))]
    async fn subtract_floors_every_row_at_zero(pool: MySqlPool) -> sqlx::Result<()> {
        let repo = InventoryRepository::new(pool);

        let change = repo
            .apply_update(BloodType::ANegative, None, &InventoryAction::Subtract, 1_000)
            .await?;

        assert!(change.previous_quantity > 0);
        assert_eq!(change.final_quantity, 0);
        assert!(change.rows.iter().all(|row| row.units_available == 0));
        Ok(())
    }

    #[ignore = "requires a MySQL database"]
    #[sqlx::test(fixtures(path = "../../fixtures", scripts("bloodbank")))]
    async fn add_applies_to_each_matched_row(pool: MySqlPool) -> sqlx::Result<()> {
        let repo = InventoryRepository::new(pool);

        let before = repo
            .apply_update(BloodType::OPositive, None, &InventoryAction::Add, 0)
            .await?;
        let after = repo
            .apply_update(BloodType::OPositive, None, &InventoryAction::Add, 5)
            .await?;

        assert_eq!(after.previous_quantity, before.final_quantity);
        assert_eq!(
            after.final_quantity,
            before.final_quantity + 5 * after.rows.len() as i64
        );
        Ok(())
    }

    #[ignore = "requires a MySQL database"]
    #[sqlx::test(fixtures(path = "../../fixtures", scripts("bloodbank")))]
    async fn missing_row_is_created_unless_action_unknown(pool: MySqlPool) -> sqlx::Result<()> {
        let repo = InventoryRepository::new(pool);

        let unknown = InventoryAction::Unknown("multiply".into());
        let noop = repo
            .apply_update(BloodType::AbNegative, Some(2), &unknown, 9)
            .await?;
        assert!(noop.rows.is_empty());

        let created = repo
            .apply_update(BloodType::AbNegative, Some(2), &InventoryAction::Add, 9)
            .await?;
        assert_eq!(created.previous_quantity, 0);
        assert_eq!(created.final_quantity, 9);
        assert_eq!(created.rows.len(), 1);
        Ok(())
    }

    #[ignore = "requires a MySQL database"]
    #[sqlx::test(fixtures(path = "../../fixtures", scripts("bloodbank")))]
    async fn concurrent_first_updates_share_one_row(pool: MySqlPool) -> sqlx::Result<()> {
        let first = InventoryRepository::new(pool.clone());
        let second = InventoryRepository::new(pool.clone());

        let (a, b) = tokio::join!(
            first.apply_update(BloodType::BNegative, Some(1), &InventoryAction::Add, 2),
            second.apply_update(BloodType::BNegative, Some(1), &InventoryAction::Add, 3),
        );
        a?;
        b?;

        let after = InventoryRepository::new(pool)
            .apply_update(BloodType::BNegative, Some(1), &InventoryAction::Add, 0)
            .await?;
        assert_eq!(after.rows.len(), 1);
        assert_eq!(after.final_quantity, 5);
        Ok(())
    }
}

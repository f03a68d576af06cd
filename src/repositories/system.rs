//! SystemRepository - facts about the database itself

use sqlx::{Error, MySqlPool};

pub struct SystemRepository {
    connection_pool: MySqlPool,
}

impl SystemRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Number of tables in the connected schema
    pub async fn count_tables(&self) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = DATABASE()",
        )
        .fetch_one(&self.connection_pool)
        .await
    }
}

//! Hospital approval counts

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct HospitalApproval {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
}

//! Admin dashboard DTOs

use crate::entities::{
    BloodTypeUnits, HospitalApproval, InventoryTotals, RegistrationStats, RoleCount, UserRole,
};
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct SystemHealthDTO {
    pub database_status: &'static str,
    pub total_tables: i64,
    pub last_backup: Option<String>,
    pub uptime_seconds: u64,
}

#[derive(Serialize, Debug, Clone)]
pub struct AdminStatsDTO {
    pub total_users: i64,
    pub total_donors: i64,
    pub total_hospitals: i64,
    pub total_admins: i64,
    pub hospitals_approved: i64,
    pub hospitals_pending: i64,
    pub total_blood_units: i64,
    pub blood_requests: i64,
    pub active_blood_banks: i64,
    pub recent_registrations: i64,
    pub recent_donors: i64,
    pub recent_hospitals: i64,
    pub blood_type_distribution: Vec<BloodTypeUnits>,
    pub system_health: SystemHealthDTO,
}

impl AdminStatsDTO {
    pub fn new(
        roles: &[RoleCount],
        hospitals: &HospitalApproval,
        inventory: &InventoryTotals,
        registrations: &RegistrationStats,
        blood_type_distribution: Vec<BloodTypeUnits>,
        system_health: SystemHealthDTO,
    ) -> Self {
        let with_role = |role: UserRole| {
            roles
                .iter()
                .filter(|r| r.role == role.as_str())
                .map(|r| r.count)
                .sum::<i64>()
        };

        Self {
            total_users: roles.iter().map(|r| r.count).sum(),
            total_donors: with_role(UserRole::Donor),
            total_hospitals: with_role(UserRole::Hospital),
            total_admins: with_role(UserRole::Admin),
            hospitals_approved: hospitals.approved,
            hospitals_pending: hospitals.pending,
            total_blood_units: inventory.total_available,
            blood_requests: inventory.total_required,
            active_blood_banks: inventory.hospitals_with_inventory,
            recent_registrations: registrations.recent_registrations,
            recent_donors: registrations.recent_donors,
            recent_hospitals: registrations.recent_hospitals,
            blood_type_distribution,
            system_health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_are_totalled_by_role() {
        let roles = vec![
            RoleCount { role: "donor".into(), count: 40 },
            RoleCount { role: "hospital".into(), count: 5 },
            RoleCount { role: "admin".into(), count: 2 },
        ];
        let health = SystemHealthDTO {
            database_status: "online",
            total_tables: 9,
            last_backup: None,
            uptime_seconds: 12,
        };
        let stats = AdminStatsDTO::new(
            &roles,
            &HospitalApproval { total: 6, approved: 4, pending: 2 },
            &InventoryTotals::default(),
            &RegistrationStats::default(),
            Vec::new(),
            health,
        );
        assert_eq!(stats.total_users, 47);
        assert_eq!(stats.total_donors, 40);
        assert_eq!(stats.total_admins, 2);
        assert_eq!(stats.hospitals_pending, 2);
    }
}

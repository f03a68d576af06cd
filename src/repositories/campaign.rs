//! CampaignRepository - donation campaigns, their donations and timeline

use super::Read;
use crate::entities::{CampaignCounts, CampaignDetailRow, CampaignDonationRow, CampaignListRow, TimelineRow};
use sqlx::{Error, MySql, MySqlPool, QueryBuilder};

/// Maximum number of timeline entries returned for one campaign
const TIMELINE_LIMIT: i64 = 20;

pub struct CampaignRepository {
    connection_pool: MySqlPool,
}

impl CampaignRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Campaigns newest first. With `active_only`, campaigns that are
    /// switched off or already ended are left out.
    pub async fn list(
        &self,
        active_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CampaignListRow>, Error> {
        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT
                c.id,
                c.title,
                c.description,
                c.hospital_id,
                c.organizer_id,
                c.blood_type,
                c.target_units,
                c.collected_units,
                c.start_date,
                c.end_date,
                c.is_active,
                c.created_at,
                h.hospital_name,
                h.city,
                u.full_name AS organizer_name,
                CAST(DATEDIFF(c.end_date, CURDATE()) AS SIGNED) AS days_remaining
             FROM campaigns c
             LEFT JOIN hospitals h ON c.hospital_id = h.id
             LEFT JOIN users u ON c.organizer_id = u.id",
        );
        if active_only {
            builder.push(" WHERE c.is_active = 1 AND c.end_date >= CURDATE()");
        }
        builder
            .push(" ORDER BY c.created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        builder
            .build_query_as::<CampaignListRow>()
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Donations made for a campaign, newest first
    pub async fn donations(&self, campaign_id: i32) -> Result<Vec<CampaignDonationRow>, Error> {
        sqlx::query_as::<_, CampaignDonationRow>(
            "SELECT
                d.id,
                d.donor_id,
                d.blood_type,
                d.quantity,
                d.status,
                d.donation_date,
                d.scheduled_date,
                d.created_at,
                u.full_name AS donor_name,
                u.blood_type AS donor_blood_type,
                u.phone AS donor_phone
             FROM donations d
             LEFT JOIN users u ON d.donor_id = u.id
             WHERE d.campaign_id = ?
             ORDER BY d.created_at DESC",
        )
        .bind(campaign_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Donations plus the latest status change, newest first
    pub async fn timeline(&self, campaign_id: i32) -> Result<Vec<TimelineRow>, Error> {
        sqlx::query_as::<_, TimelineRow>(
            "SELECT
                'donation' AS activity_type,
                d.created_at AS activity_date,
                CONCAT('Donation of ', d.quantity, ' units by ', u.full_name) AS activity_description,
                d.status AS activity_status
             FROM donations d
             LEFT JOIN users u ON d.donor_id = u.id
             WHERE d.campaign_id = ?
             UNION ALL
             SELECT
                'campaign_update' AS activity_type,
                c.updated_at AS activity_date,
                CONCAT('Campaign status updated to: ', c.status) AS activity_description,
                c.status AS activity_status
             FROM campaigns c
             WHERE c.id = ?
             ORDER BY activity_date DESC
             LIMIT ?",
        )
        .bind(campaign_id)
        .bind(campaign_id)
        .bind(TIMELINE_LIMIT)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Campaign counts by lifecycle phase, as of today
    pub async fn counts(&self) -> Result<CampaignCounts, Error> {
        sqlx::query_as::<_, CampaignCounts>(
            "SELECT
                COUNT(*) AS total,
                CAST(COALESCE(SUM(CASE WHEN is_active = 1 AND start_date <= CURDATE() AND end_date >= CURDATE() THEN 1 ELSE 0 END), 0) AS SIGNED) AS active,
                CAST(COALESCE(SUM(CASE WHEN end_date < CURDATE() THEN 1 ELSE 0 END), 0) AS SIGNED) AS completed,
                CAST(COALESCE(SUM(CASE WHEN start_date > CURDATE() THEN 1 ELSE 0 END), 0) AS SIGNED) AS pending,
                CAST(COALESCE(SUM(collected_units), 0) AS SIGNED) AS total_units_collected
             FROM campaigns",
        )
        .fetch_one(&self.connection_pool)
        .await
    }
}

/// Reads a campaign with its originating request, hospital and the
/// aggregates of its donations.
impl Read<CampaignDetailRow, i32> for CampaignRepository {
    async fn read(&self, id: &i32) -> Result<Option<CampaignDetailRow>, Error> {
        sqlx::query_as::<_, CampaignDetailRow>(
            "SELECT
                c.id,
                c.title,
                c.description,
                c.status,
                c.hospital_id,
                c.request_id,
                COALESCE(r.blood_type, c.blood_type) AS blood_type,
                CAST(COALESCE(r.units_needed, c.target_units) AS SIGNED) AS units_needed,
                CAST(r.urgency_level AS CHAR) AS urgency_level,
                r.location AS request_location,
                r.description AS request_description,
                h.hospital_name,
                h.contact_person,
                h.phone AS hospital_phone,
                h.address AS hospital_address,
                c.start_date,
                c.end_date,
                c.created_at,
                c.updated_at,
                COALESCE(agg.total_donations, 0) AS total_donations,
                CAST(COALESCE(agg.units_collected, 0) AS SIGNED) AS units_collected,
                CAST(COALESCE(agg.avg_donation_size, 0) AS DOUBLE) AS avg_donation_size
             FROM campaigns c
             LEFT JOIN requests r ON c.request_id = r.id
             LEFT JOIN hospitals h ON COALESCE(r.hospital_id, c.hospital_id) = h.id
             LEFT JOIN (
                SELECT
                    campaign_id,
                    COUNT(*) AS total_donations,
                    SUM(CASE WHEN status = 'completed' THEN quantity ELSE 0 END) AS units_collected,
                    AVG(quantity) AS avg_donation_size
                FROM donations
                GROUP BY campaign_id
             ) agg ON agg.campaign_id = c.id
             WHERE c.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ignore = "requires a MySQL database"]
    #[sqlx::test(fixtures(path = "../../fixtures", scripts("bloodbank")))]
    async fn detail_aggregates_completed_donations(pool: MySqlPool) -> sqlx::Result<()> {
        let repo = CampaignRepository::new(pool);

        let campaign = repo.read(&1).await?.expect("fixture campaign 1");
        assert_eq!(campaign.total_donations, 2);
        assert_eq!(campaign.units_collected, 1);

        let timeline = repo.timeline(1).await?;
        assert_eq!(timeline.len(), 3);
        assert!(timeline.windows(2).all(|w| w[0].activity_date >= w[1].activity_date));

        assert!(repo.read(&999).await?.is_none());
        Ok(())
    }
}

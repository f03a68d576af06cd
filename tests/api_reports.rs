//! Integration tests for the read-only reporting endpoints
//!
//! Tests for:
//! - GET /
//! - GET /api/admin/stats
//! - GET /api/requests/emergency
//! - GET /api/hospitals/activities
//! - GET /api/donations/trends
//! - GET /api/donors/search

mod common;

#[cfg(test)]
mod report_tests {
    use super::common::{create_test_server, create_test_state, degraded_server};
    use axum::http::StatusCode;
    use bloodbank_server::dtos::DEGRADED_MESSAGE;
    use serde_json::{Value, json};
    use sqlx::MySqlPool;

    #[tokio::test]
    async fn test_root_reports_running() {
        let server = degraded_server();

        let response = server.get("/").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["status"], json!("ok"));
    }

    #[tokio::test]
    async fn test_admin_stats_report_offline_database() {
        let server = degraded_server();

        let response = server.get("/api/admin/stats").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["degraded"], json!(true));
        assert_eq!(body["message"], json!(DEGRADED_MESSAGE));
        assert_eq!(body["data"]["total_users"], json!(0));
        assert_eq!(body["data"]["blood_type_distribution"], json!([]));
        assert_eq!(body["data"]["system_health"]["database_status"], json!("offline"));
        assert_eq!(body["data"]["system_health"]["last_backup"], Value::Null);
    }

    #[tokio::test]
    async fn test_emergency_limit_is_clamped() {
        let server = degraded_server();

        for (raw, expected) in [("9999", 100), ("0", 1), ("abc", 20), ("-5", 1)] {
            let response = server
                .get("/api/requests/emergency")
                .add_query_param("limit", raw)
                .await;

            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["filters"]["limit"], json!(expected), "limit={raw}");
            assert_eq!(body["data"], json!([]));
            assert_eq!(body["stats"]["total_requests"], json!(0));
        }
    }

    #[tokio::test]
    async fn test_emergency_status_all_means_no_filter() {
        let server = degraded_server();

        let response = server
            .get("/api/requests/emergency")
            .add_query_param("status", "all")
            .await;

        let body: Value = response.json();
        assert_eq!(body["filters"]["status"], json!("all"));
        assert_eq!(body["filters"]["limit"], json!(20));
    }

    #[tokio::test]
    async fn test_activities_limit_is_clamped_to_fifty() {
        let server = degraded_server();

        let response = server
            .get("/api/hospitals/activities")
            .add_query_param("limit", "9999")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["degraded"], json!(true));
        assert_eq!(body["filters"]["limit"], json!(50));
        assert_eq!(body["stats"]["total_activities"], json!(0));
    }

    #[tokio::test]
    async fn test_trends_reject_unknown_blood_type() {
        let server = degraded_server();

        let response = server
            .get("/api/donations/trends")
            .add_query_param("blood_type", "Z+")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], json!("Invalid blood type"));
    }

    #[tokio::test]
    async fn test_trends_keep_shape_when_degraded() {
        let server = degraded_server();

        let response = server
            .get("/api/donations/trends")
            .add_query_param("days", "1000")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["degraded"], json!(true));
        assert_eq!(body["data"]["period"]["days"], json!(365));
        assert_eq!(body["data"]["statistics"]["trend_direction"], json!("stable"));
        assert_eq!(body["data"]["daily_chart"]["data"], json!([]));
        assert_eq!(
            body["data"]["blood_type_chart"]["title"],
            json!("Blood Type Distribution - Last 365 Days")
        );
    }

    #[tokio::test]
    async fn test_donor_search_rejects_unknown_blood_type() {
        let server = degraded_server();

        let response = server
            .get("/api/donors/search")
            .add_query_param("blood_type", "AB")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_donor_search_degrades_to_empty_list() {
        let server = degraded_server();

        let response = server
            .get("/api/donors/search")
            .add_query_param("query", "jane")
            .add_query_param("blood_type", "O+")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["degraded"], json!(true));
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["stats"]["search_query"], json!("jane"));
        assert_eq!(body["stats"]["blood_type_filter"], json!("O+"));
    }

    #[ignore = "requires a MySQL database"]
    #[sqlx::test(fixtures(path = "../fixtures", scripts("bloodbank")))]
    async fn test_donor_search_masks_contact_details(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/api/donors/search")
            .add_query_param("query", "Jane")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"][0]["email"], json!("jan***@example.com"));
        assert_eq!(body["data"][0]["phone"], json!("555***111"));
        assert_eq!(body["stats"]["total_found"], json!(1));
        Ok(())
    }

    #[ignore = "requires a MySQL database"]
    #[sqlx::test(fixtures(path = "../fixtures", scripts("bloodbank")))]
    async fn test_emergency_requests_rank_by_urgency(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server.get("/api/requests/emergency").await;

        let body: Value = response.json();
        assert_eq!(body["stats"]["total_requests"], json!(2));
        assert_eq!(body["data"][0]["urgency_level"], json!("emergency"));
        assert_eq!(body["data"][1]["urgency_level"], json!("critical"));
        Ok(())
    }
}

use axum_test::TestServer;
use bloodbank_server::core::AppState;
use sqlx::{MySqlPool, mysql::MySqlPoolOptions};
use std::sync::Arc;
use std::time::Duration;

/// A pool pointing at a port nobody listens on.
///
/// Every query fails fast with a pool timeout, which drives the handlers
/// through their degraded paths without a database.
pub fn unreachable_pool() -> MySqlPool {
    MySqlPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("mysql://root@127.0.0.1:9/bloodbank")
        .expect("valid database url")
}

/// Creates an AppState for the tests
///
/// # Arguments
/// * `pool` - MySQL connection pool
pub fn create_test_state(pool: MySqlPool) -> Arc<AppState> {
    Arc::new(AppState::new(pool))
}

/// Creates a TestServer for the tests
///
/// # Arguments
/// * `state` - AppState used by the server
///
/// # Returns
/// TestServer ready to send requests
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = bloodbank_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// TestServer backed by [`unreachable_pool`]
pub fn degraded_server() -> TestServer {
    create_test_server(create_test_state(unreachable_pool()))
}

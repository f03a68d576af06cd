use bloodbank_server::{AppState, config::Config, create_router};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloodbank_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    config.log_info();

    // Lazy pool: the server starts even when MySQL is down and answers degraded
    let connect_options = config.database_url.parse::<MySqlConnectOptions>()?;
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy_with(connect_options);
    info!("Database connection pool created");

    if config.run_migrations {
        match sqlx::migrate!().run(&pool).await {
            Ok(()) => info!("Database migrations applied"),
            Err(err) => warn!("Could not apply migrations: {}", err),
        }
    }

    let state = Arc::new(AppState::new(pool));
    let app = create_router(state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub async fn create_pool(database_url: &str) -> PgPool {
    let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await
        .expect("Failed to create database pool")
}

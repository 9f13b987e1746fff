use crate::config::get_config;
use crate::error::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Opens the pool, retrying with a fixed delay until the database accepts
/// connections. Startup blocks here rather than serving requests without
/// a working database.
pub async fn create_pool() -> Result<PgPool> {
    let config = get_config();
    loop {
        let attempt = PgPoolOptions::new()
            .max_connections(50)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.database_url)
            .await;

        match attempt {
            Ok(pool) => return Ok(pool),
            Err(err) => {
                tracing::warn!(
                    "database connection failed: {}, retrying in {}s",
                    err,
                    CONNECT_RETRY_DELAY.as_secs()
                );
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
            }
        }
    }
}

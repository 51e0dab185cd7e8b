use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;

use boardquote_core::config::DatabaseConfig;

pub type DbPool = sqlx::SqlitePool;

/// Pool sized and timed from the `[database]` config section. Every
/// connection gets the same pragma set; WAL keeps readers open while a
/// reconcile transaction writes.
pub async fn connect_pool(database: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let busy_timeout_ms = database.timeout_secs.clamp(1, 30).saturating_mul(1_000);
    SqlitePoolOptions::new()
        .max_connections(database.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(database.timeout_secs.max(1)))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await?;
                sqlx::query("PRAGMA journal_mode = WAL").execute(&mut *conn).await?;
                sqlx::query(&format!("PRAGMA busy_timeout = {busy_timeout_ms}"))
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .connect(database.url.trim())
        .await
}

/// Single-connection pool on a bare URL. Tests lean on this with
/// `sqlite::memory:`, where every additional connection would open a
/// separate empty database.
pub async fn connect(database_url: &str) -> Result<DbPool, sqlx::Error> {
    connect_pool(&DatabaseConfig {
        url: database_url.to_owned(),
        max_connections: 1,
        timeout_secs: 30,
    })
    .await
}

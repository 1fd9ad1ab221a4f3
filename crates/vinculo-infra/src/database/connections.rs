use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Connection settings for the content store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Bound on opening a connection and on waiting for a pooled one.
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout: Duration::from_secs(10),
        }
    }

    fn options(&self) -> ConnectOptions {
        ConnectOptions::new(&self.url)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned()
    }
}

/// Open the connection pool for the content store.
///
/// Fails when the database cannot be reached right now.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Connecting to the content store...");

    let conn = Database::connect(config.options()).await?;
    tracing::info!(
        "Content store connected (pool: {})",
        config.max_connections
    );

    Ok(conn)
}

/// Build the pool without opening a connection.
///
/// Connections are opened on first use, so an unreachable database surfaces
/// as a per-request connection error instead of a startup failure.
pub async fn connect_lazy(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    let mut opts = config.options();
    opts.connect_lazy(true);

    let conn = Database::connect(opts).await?;
    tracing::info!(
        "Content store pool created lazily (pool: {})",
        config.max_connections
    );

    Ok(conn)
}

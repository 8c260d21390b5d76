use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

/// Establishes a pool from parsed connection options
///
/// The retry loop only sees this trait, so it can be driven without a live
/// server.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    async fn connect(
        &self,
        pool_options: PgPoolOptions,
        connect_options: PgConnectOptions,
    ) -> Result<PgPool, sqlx::Error>;
}

/// Connects for real through sqlx, opening the first connection eagerly
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlxConnector;

#[async_trait::async_trait]
impl Connector for SqlxConnector {
    async fn connect(
        &self,
        pool_options: PgPoolOptions,
        connect_options: PgConnectOptions,
    ) -> Result<PgPool, sqlx::Error> {
        pool_options.connect_with(connect_options).await
    }
}

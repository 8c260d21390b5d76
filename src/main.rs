use pgboot::{Initializer, Settings};
use sea_query::Expr;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let config = settings.postgres_config();

    // Ctrl-C aborts a retry loop that is still waiting on the database
    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
        }
        signal.cancel();
    });

    let pg = Initializer::new(config)
        .with_cancellation(shutdown.clone())
        .connect(&settings.database_url)
        .await?;

    let mut probe = pg.builder.select();
    probe.expr(Expr::cust("1"));
    let (sql, _) = pg.builder.build(&probe);
    let one: i32 = sqlx::query_scalar(&sql).fetch_one(&pg.pool).await?;
    tracing::info!(result = one, max_connections = config.pool_size(), "Postgres is ready");

    shutdown.cancelled().await;
    pg.close().await;
    tracing::info!("Postgres pool closed");

    Ok(())
}

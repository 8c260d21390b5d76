//! PostgreSQL pool bootstrap
//!
//! Parses a connection URL, establishes a bounded `sqlx` pool with retries,
//! and wraps it together with a statement builder in a [`Postgres`] handle.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::db::builder::StatementBuilder;
use crate::error::{PostgresError, PostgresResult};

pub mod config;
pub mod connector;
pub mod retry;

pub use config::PostgresConfig;
pub use connector::{Connector, SqlxConnector};
pub use retry::{FixedDelay, RetryPolicy};

/// A live connection pool plus a statement builder for it
#[derive(Debug, Clone)]
pub struct Postgres {
    /// The connection pool
    pub pool: PgPool,
    /// SQL statement builder using `$n` placeholders
    pub builder: StatementBuilder,
}

impl Postgres {
    /// Connects with the given configuration through sqlx
    pub async fn new(url: &str, config: PostgresConfig) -> PostgresResult<Self> {
        Initializer::new(config).connect(url).await
    }

    /// Closes every connection in the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Runs the parse / connect / retry sequence that produces a [`Postgres`]
///
/// Defaults to [`SqlxConnector`], a [`FixedDelay`] of the configured
/// connection timeout, and a token that is never cancelled.
#[derive(Clone)]
pub struct Initializer {
    config: PostgresConfig,
    connector: Arc<dyn Connector>,
    retry: Arc<dyn RetryPolicy>,
    cancel: CancellationToken,
}

impl Initializer {
    pub fn new(config: PostgresConfig) -> Self {
        Self {
            config,
            connector: Arc::new(SqlxConnector),
            retry: Arc::new(FixedDelay(config.timeout())),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_connector(mut self, connector: impl Connector + 'static) -> Self {
        self.connector = Arc::new(connector);
        self
    }

    pub fn with_retry_policy(mut self, retry: impl RetryPolicy + 'static) -> Self {
        self.retry = Arc::new(retry);
        self
    }

    /// Aborts a pending connect attempt or sleep once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Builds a fresh handle
    pub async fn connect(&self, url: &str) -> PostgresResult<Postgres> {
        self.run(url, "new").await
    }

    #[instrument(skip_all, fields(context = context))]
    async fn run(&self, url: &str, context: &'static str) -> PostgresResult<Postgres> {
        self.config.validate()?;

        let connect_options = PgConnectOptions::from_str(url).map_err(|e| PostgresError::Parse {
            context,
            source: Arc::new(e),
        })?;
        let pool_options = PgPoolOptions::new().max_connections(self.config.pool_size());

        let mut remaining = self.config.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    return Err(PostgresError::Cancelled { context, attempts: attempt - 1 });
                }
                result = self.connector.connect(pool_options.clone(), connect_options.clone()) => result,
            };

            let err = match result {
                Ok(pool) => {
                    tracing::info!(attempts = attempt, "Successfully connected to Postgres");
                    return Ok(Postgres {
                        pool,
                        builder: StatementBuilder::new(),
                    });
                }
                Err(e) => e,
            };

            remaining -= 1;
            if remaining == 0 {
                tracing::error!(error = %err, attempts = attempt, "Giving up on Postgres");
                return Err(PostgresError::ConnectionExhausted {
                    context,
                    attempts: attempt,
                    source: Arc::new(err),
                });
            }

            let delay = self.retry.delay(attempt);
            tracing::warn!(error = %err, attempt, "Postgres connection attempt failed");
            tracing::info!(
                attempts_left = remaining,
                delay_ms = delay.as_millis(),
                "Trying to connect to Postgres"
            );

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    return Err(PostgresError::Cancelled { context, attempts: attempt });
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

/// Once-only gate around [`Initializer`]
///
/// The first call decides the outcome. Concurrent callers wait for it, and
/// every later call gets the same handle or the same error back, whatever
/// URL or initializer it passes.
#[derive(Debug, Default)]
pub struct PostgresOnce {
    cell: OnceCell<PostgresResult<Arc<Postgres>>>,
}

impl PostgresOnce {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    pub async fn get_or_connect(
        &self,
        url: &str,
        initializer: &Initializer,
    ) -> PostgresResult<Arc<Postgres>> {
        if self.cell.initialized() {
            tracing::debug!("Postgres already initialized, ignoring connection arguments");
        }

        self.cell
            .get_or_init(|| async { initializer.run(url, "new_once").await.map(Arc::new) })
            .await
            .clone()
    }

    /// The recorded outcome, if the first call has finished
    pub fn get(&self) -> Option<&PostgresResult<Arc<Postgres>>> {
        self.cell.get()
    }
}

static POSTGRES: PostgresOnce = PostgresOnce::new();

/// Process-wide singleton
///
/// Only the first call's `url` and `config` are ever used. Prefer owning a
/// [`PostgresOnce`] and passing it to dependents.
pub async fn new_once(url: &str, config: PostgresConfig) -> PostgresResult<Arc<Postgres>> {
    POSTGRES
        .get_or_connect(url, &Initializer::new(config))
        .await
}

use std::sync::Arc;

/// Errors raised while bringing up the Postgres pool
///
/// Underlying `sqlx` errors are kept behind an `Arc` so a failed once-gated
/// construction can hand the same error to every caller.
#[derive(thiserror::Error, Debug, Clone)]
pub enum PostgresError {
    #[error("postgres - invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("postgres - {context} - parse connection url")]
    Parse {
        context: &'static str,
        #[source]
        source: Arc<sqlx::Error>,
    },

    #[error("postgres - {context} - connect failed after {attempts} attempts")]
    ConnectionExhausted {
        context: &'static str,
        attempts: u32,
        #[source]
        source: Arc<sqlx::Error>,
    },

    #[error("postgres - {context} - cancelled after {attempts} attempts")]
    Cancelled { context: &'static str, attempts: u32 },
}

impl PostgresError {
    /// Number of connect attempts made before this error was produced
    pub fn attempts(&self) -> u32 {
        match self {
            PostgresError::InvalidConfig(_) | PostgresError::Parse { .. } => 0,
            PostgresError::ConnectionExhausted { attempts, .. }
            | PostgresError::Cancelled { attempts, .. } => *attempts,
        }
    }
}

pub type PostgresResult<T> = Result<T, PostgresError>;

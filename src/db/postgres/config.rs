use std::time::Duration;

use crate::error::{PostgresError, PostgresResult};

const DEFAULT_CONNECTION_ATTEMPTS: u32 = 5;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(1);
const DEFAULT_MAX_POOL_SIZE: u32 = 1;

/// Knobs applied before the pool is constructed
///
/// Setters consume and return the value so they chain; a later call to the
/// same setter overrides an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostgresConfig {
    connection_attempts: u32,
    connection_timeout: Duration,
    max_pool_size: u32,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            connection_attempts: DEFAULT_CONNECTION_ATTEMPTS,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }
}

impl PostgresConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times to try to connect before returning an error
    pub fn connection_attempts(mut self, count: u32) -> Self {
        self.connection_attempts = count;
        self
    }

    /// How long to wait before trying to connect again
    pub fn connection_timeout(mut self, duration: Duration) -> Self {
        self.connection_timeout = duration;
        self
    }

    /// How many connections the pool may hold at once
    pub fn max_pool_size(mut self, size: u32) -> Self {
        self.max_pool_size = size;
        self
    }

    pub fn attempts(&self) -> u32 {
        self.connection_attempts
    }

    pub fn timeout(&self) -> Duration {
        self.connection_timeout
    }

    pub fn pool_size(&self) -> u32 {
        self.max_pool_size
    }

    /// Rejects values the retry loop and the pool cannot work with
    pub fn validate(&self) -> PostgresResult<()> {
        if self.connection_attempts == 0 {
            return Err(PostgresError::InvalidConfig(
                "connection_attempts must be at least 1".to_string(),
            ));
        }
        if self.max_pool_size == 0 {
            return Err(PostgresError::InvalidConfig(
                "max_pool_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub mod config;
pub mod db;
pub mod error;

pub use config::Settings;
pub use db::{new_once, Initializer, Postgres, PostgresConfig, PostgresOnce, StatementBuilder};
pub use error::{PostgresError, PostgresResult};

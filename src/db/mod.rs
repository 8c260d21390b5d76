pub mod builder;
pub mod postgres;

pub use builder::StatementBuilder;
pub use postgres::{new_once, Initializer, Postgres, PostgresConfig, PostgresOnce};

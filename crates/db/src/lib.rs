//! Database layer for the food catalog.
//!
//! Entities, migrations and repositories for categories, food groups,
//! products and users, all on `PostgreSQL`.

pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod test_utils;

use catalog_common::{AppError, Config, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::log::LevelFilter;

/// Pool options for the catalog database.
#[must_use]
pub fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(&config.url);
    let connect_timeout = Duration::from_secs(config.connect_timeout_secs);

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .connect_timeout(connect_timeout)
        .acquire_timeout(connect_timeout)
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .sqlx_logging(config.log_statements)
        .sqlx_logging_level(LevelFilter::Debug);

    opt
}

/// Open the connection pool.
pub async fn init(config: &Config) -> Result<DatabaseConnection, AppError> {
    tracing::debug!(
        max_connections = config.database.max_connections,
        min_connections = config.database.min_connections,
        "Opening database pool"
    );

    Database::connect(connect_options(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Run pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AppError> {
    use sea_orm_migration::MigratorTrait;
    migrations::Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

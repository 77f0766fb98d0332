use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::migration::Migrator;

/// Opens the pool and brings the schema up to date.
pub async fn connect_db(config: &AppConfig) -> AppResult<DatabaseConnection> {
    if config.is_sqlite() && !config.is_sqlite_memory() {
        ensure_sqlite_dir(config);
    }

    let mut opts = ConnectOptions::new(config.database_url());
    opts.sqlx_logging(false);
    if config.is_sqlite_memory() {
        // every pooled connection would otherwise see its own empty database
        opts.max_connections(1)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(u32::MAX as u64))
            .max_lifetime(Duration::from_secs(u32::MAX as u64));
    }

    let db = Database::connect(opts).await?;
    info!("database connection established");

    if config.is_sqlite() {
        enable_foreign_keys(&db).await?;
    }
    migrate(&db).await?;
    Ok(db)
}

pub async fn migrate(db: &DatabaseConnection) -> AppResult<()> {
    let pending = Migrator::get_pending_migrations(db).await?;
    debug!("{} pending migration(s)", pending.len());
    Migrator::up(db, None).await?;
    info!("schema is up to date");
    Ok(())
}

async fn enable_foreign_keys(db: &DatabaseConnection) -> AppResult<()> {
    let backend = db.get_database_backend();
    db.execute(Statement::from_string(backend, "PRAGMA foreign_keys = ON"))
        .await?;
    Ok(())
}

fn ensure_sqlite_dir(config: &AppConfig) {
    let raw = config.database_url();
    let path = raw
        .strip_prefix("sqlite://")
        .or_else(|| raw.strip_prefix("sqlite:"))
        .unwrap_or(raw.as_str());
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        let _ = fs::create_dir_all(parent);
    }
}

use log::{error, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::{Connection, SimpleConnection};
use diesel::r2d2;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::{IntoCore, StorageError};
use tardi_core::errors::{Error, Result};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub mod write_actor;
pub use write_actor::{spawn_writer, WriteHandle};

/// Pool sizing and timeouts, supplied by the host's configuration.
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub max_size: u32,
    pub connection_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 4,
            connection_timeout: Duration::from_secs(30),
        }
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url == ":memory:" || database_url.starts_with("file:")
}

/// Prepares the database file: creates its directory and switches it to WAL.
///
/// Any failure here means the store is unusable with the given settings and is
/// reported as a configuration error.
pub fn init(database_url: &str) -> Result<String> {
    let database_url = database_url.trim();
    if database_url.is_empty() {
        return Err(Error::Configuration("database URL is empty".to_string()));
    }

    if !is_in_memory(database_url) {
        if let Some(db_dir) = Path::new(database_url).parent() {
            if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
                fs::create_dir_all(db_dir).map_err(|e| {
                    error!("Failed to create database directory {:?}: {}", db_dir, e);
                    Error::Configuration(format!(
                        "cannot create database directory {}: {}",
                        db_dir.display(),
                        e
                    ))
                })?;
            }
        }
    }

    let mut conn = SqliteConnection::establish(database_url).into_core()?;
    conn.batch_execute(
        "
            PRAGMA journal_mode = WAL;
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous  = NORMAL;
        ",
    )
    .into_core()?;

    Ok(database_url.to_string())
}

pub fn create_pool(database_url: &str, options: &PoolOptions) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(options.max_size)
        .min_idle(Some(1)) // Keep at least one connection ready
        .connection_timeout(options.connection_timeout)
        .connection_customizer(Box::new(ConnectionCustomizer {}))
        .build(manager)
        .into_core()?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Running database migrations");
    let mut connection = get_connection(pool)?;

    let result = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        Error::from(StorageError::MigrationFailed(e.to_string()))
    })?;

    if result.is_empty() {
        info!("No pending migrations to apply.");
    } else {
        info!("Applied the following migrations:");
        for migration_version in &result {
            info!("  - {}", migration_version);
        }
    }

    Ok(())
}

/// Gets a connection from the pool
pub fn get_connection(pool: &Pool<ConnectionManager<SqliteConnection>>) -> Result<DbConnection> {
    pool.get().into_core()
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous = NORMAL;
        ",
        )
        .map_err(diesel::r2d2::Error::QueryError)?;

        Ok(())
    }
}

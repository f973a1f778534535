//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{Subscription, Transaction};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default location of the `SQLite` file when neither the config file nor the
/// environment names one. `mode=rwc` creates the file on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/finance_tracker.sqlite?mode=rwc";

/// Opens a connection pool for the given database URL.
///
/// For a file-backed `SQLite` URL the parent directory is created first, since the driver
/// creates the file but not the directories leading to it.
///
/// # Errors
/// Returns [`crate::errors::Error::Io`] if the directory cannot be created and
/// [`crate::errors::Error::Database`] if the connection fails.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url)
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
        debug!(dir = %parent.display(), "Ensured database directory");
    }

    debug!("Opening database connection");
    let db = Database::connect(database_url).await?;
    info!("Database connection established");
    Ok(db)
}

/// File path named by a `sqlite:` URL, or `None` for in-memory and non-`SQLite` URLs.
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    if path.is_empty() || path == ":memory:" || path.starts_with("file::memory:") {
        return None;
    }
    Some(Path::new(path))
}

/// Creates the `transactions` and `subscriptions` tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table_for(db, Transaction).await?;
    create_table_for(db, Subscription).await?;
    info!("Database tables ensured");
    Ok(())
}

async fn create_table_for<E>(db: &DatabaseConnection, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(builder.build(&statement)).await?;
    Ok(())
}

use std::path::Path;

use diesel::{prelude::*, sql_query, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;
use tracing::{debug, info};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Error)]
pub enum EstablishConnectionError {
    #[error("CreateDatabaseDirectory {path}: {source}")]
    CreateDatabaseDirectory {
        path: String,
        source: std::io::Error,
    },

    #[error("Connect: {source}")]
    Connect {
        #[from]
        source: diesel::ConnectionError,
    },

    #[error("ConfigurePragma: {source}")]
    ConfigurePragma {
        #[from]
        source: diesel::result::Error,
    },

    #[error("RunMigrations: {source}")]
    RunMigrations {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Opens the mirror database and brings its schema up to date.
///
/// Accepts a file path or `:memory:`. Missing parent directories are created.
pub fn establish(database_path: &str) -> Result<SqliteConnection, EstablishConnectionError> {
    if database_path != IN_MEMORY {
        if let Some(parent) = Path::new(database_path)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent).map_err(|source| {
                EstablishConnectionError::CreateDatabaseDirectory {
                    path: parent.display().to_string(),
                    source,
                }
            })?;
        }
    }

    let mut conn = SqliteConnection::establish(database_path)?;

    sql_query("PRAGMA busy_timeout = 5000").execute(&mut conn)?;
    // diesel turns enforcement on; unstar deletes the repo row before its star row
    sql_query("PRAGMA foreign_keys = OFF").execute(&mut conn)?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|source| EstablishConnectionError::RunMigrations { source })?
        .len();

    if applied > 0 {
        info!(applied, database_path, "mirror schema migrated");
    } else {
        debug!(database_path, "mirror schema up to date");
    }

    Ok(conn)
}

//! SQLite bootstrap for the restaurant table.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by the record store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - The store must not touch `restaurants` before migrations succeed.
//! - Bootstrap errors name the database they were opening or the migration
//!   version that failed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Label used in errors and logs for in-memory databases.
pub const IN_MEMORY_TARGET: &str = ":memory:";

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening the restaurant database or running statements on it.
#[derive(Debug)]
pub enum DbError {
    /// SQLite refused to open `target` (a file path or `:memory:`).
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// Migration `version` failed; its transaction was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build of this service.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Statement failure on an already-open connection.
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// True when SQLite gave up waiting on a lock held by another writer.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.sqlite_error().and_then(rusqlite::Error::sqlite_error_code),
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
        )
    }

    fn sqlite_error(&self) -> Option<&rusqlite::Error> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(source) => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "failed to open restaurant database {target:?}: {source}")
            }
            Self::Migration { version, source } => {
                write!(f, "restaurant schema migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "restaurant schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.sqlite_error().map(|err| err as &(dyn Error + 'static))
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

//! SQLite storage bootstrap for persisted journal entries.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing the entry timeline.
//! - Bring the `entries` schema up to the version this build understands.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Entries are never read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the journal database.
#[derive(Debug)]
pub enum DbError {
    /// Connection or pragma setup failed before any migration ran.
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build; opening it would risk
    /// writing entries in a shape this build cannot read back.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// One migration script failed; the whole upgrade was rolled back and
    /// the file still reports `previous` as its schema version.
    MigrationFailed {
        version: u32,
        previous: u32,
        source: rusqlite::Error,
    },
}

impl DbError {
    /// Schema version a failed upgrade was heading to, when applicable.
    pub fn failed_migration(&self) -> Option<u32> {
        match self {
            Self::MigrationFailed { version, .. } => Some(*version),
            _ => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "journal database error: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "journal schema v{found} is newer than this build supports (v{supported})"
            ),
            Self::MigrationFailed {
                version,
                previous,
                source,
            } => write!(
                f,
                "journal schema migration v{previous} -> v{version} failed: {source}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::MigrationFailed { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

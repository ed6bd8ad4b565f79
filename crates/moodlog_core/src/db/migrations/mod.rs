//! Versioned schema scripts for the `entries` table.
//!
//! # Invariants
//! - Script versions start at 1 and increase by exactly one.
//! - All pending scripts run in one transaction; a failing script leaves
//!   the file at its previous version.
//! - Schema changes ship as new numbered `.sql` files, never edits.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_entries.sql"),
}];

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Upgrades `conn` to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is ahead of this build.
/// - `MigrationFailed` naming the script that broke; nothing is committed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    run_migrations(conn, MIGRATIONS)
}

fn run_migrations(conn: &mut Connection, scripts: &[Migration]) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = scripts.len() as u32;
    if found > supported {
        return Err(DbError::UnsupportedSchemaVersion { found, supported });
    }

    let pending = &scripts[found as usize..];
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        step(&tx, migration).map_err(|source| {
            error!(
                "event=db_migrate module=db status=error from={} version={} error={}",
                found, migration.version, source
            );
            DbError::MigrationFailed {
                version: migration.version,
                previous: found,
                source,
            }
        })?;
        info!(
            "event=db_migrate module=db status=ok from={} version={}",
            found, migration.version
        );
    }
    tx.commit()?;
    Ok(())
}

fn step(tx: &Transaction<'_>, migration: &Migration) -> rusqlite::Result<()> {
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)
}

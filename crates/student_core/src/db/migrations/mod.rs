//! Schema history of the student store.
//!
//! Each entry pairs a `user_version` with one bundled `.sql` file. Opening a
//! store runs every entry above the recorded version inside a single
//! transaction, so a store is either fully upgraded or left as it was.
//! Entries are append-only; an applied file is never edited.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(user_version, sql)` pairs, strictly increasing by version.
const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Returns the schema version a freshly opened store ends up at.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |&(version, _)| version)
}

/// Reads the schema version recorded on the connection.
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Brings the store up to `latest_version()`.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the store is newer than this build.
/// - `DbError::Sqlite` when a migration fails; nothing is committed then.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = current_version(conn)?;
    let latest = latest_version();

    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let pending = MIGRATIONS
        .iter()
        .filter(|&&(version, _)| version > from)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for &&(version, sql) in &pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from} to_version={latest} applied={}",
        pending.len()
    );
    Ok(())
}

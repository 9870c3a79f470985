//! Embedded schema migrations.
//!
//! # Responsibility
//! - Carry the `Employee` table schema inside the binary.
//! - Bring any database up to the latest schema version exactly once.
//!
//! # Invariants
//! - Versions are strictly increasing; the applied version is mirrored to
//!   `PRAGMA user_version`.
//! - A database stamped with a version newer than this binary knows is
//!   rejected, never partially downgraded.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Ordered migration scripts, embedded at compile time.
const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_employee.sql"))];

/// Returns the latest schema version this binary can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Applies every migration newer than the database's current version.
///
/// All pending scripts run inside a single transaction; `user_version` is
/// stamped once after the last script, so a failed run leaves the database at
/// its previous version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    let pending: Vec<&(u32, &str)> = MIGRATIONS
        .iter()
        .filter(|(version, _)| *version > current)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (_, sql) in &pending {
        tx.execute_batch(sql)?;
    }
    tx.execute_batch(&format!("PRAGMA user_version = {latest};"))?;
    tx.commit()?;

    Ok(())
}

/// Reads the schema version stamped on the connection's database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}

//! Connection-pool bootstrap for SQLite.
//!
//! # Responsibility
//! - Build file or in-memory connection pools with required pragmas applied
//!   to every connection.
//! - Trigger schema migrations before returning a usable pool.
//!
//! # Invariants
//! - Every pooled connection has `foreign_keys=ON` and a busy timeout.
//! - Returned pools point at a fully migrated database.
//! - The in-memory pool is capped at one connection; all checkouts observe
//!   the same database.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Pool handle injected into repositories. Clones share the same pool.
pub type DbPool = r2d2::Pool<SqliteConnectionManager>;

/// One checked-out connection; dropping it returns it to the pool.
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const MAX_CONNECTIONS: u32 = 8;
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a pool over a SQLite database file and applies pending migrations.
///
/// # Side effects
/// - Establishes the first connection and runs migration checks on it.
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool(path: impl AsRef<Path>) -> DbResult<DbPool> {
    let manager = SqliteConnectionManager::file(path).with_init(configure_connection);
    build_pool(manager, MAX_CONNECTIONS, "file")
}

/// Opens a pool over an in-memory SQLite database.
///
/// The pool holds exactly one connection and never recycles it: each
/// in-memory connection is its own database, so a second connection (or a
/// recycled one) would see empty state. Intended for tests and demos.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool_in_memory() -> DbResult<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(configure_connection);
    build_pool(manager, 1, "memory")
}

fn build_pool(manager: SqliteConnectionManager, max_size: u32, mode: &str) -> DbResult<DbPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let builder = r2d2::Pool::builder()
        .max_size(max_size)
        .min_idle(Some(1))
        .connection_timeout(CHECKOUT_TIMEOUT);
    let builder = if max_size == 1 {
        builder.idle_timeout(None).max_lifetime(None)
    } else {
        builder
    };

    let pool = match builder.build(manager) {
        Ok(pool) => pool,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=pool_build_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match migrate_pool(&pool) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_migrate_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn migrate_pool(pool: &DbPool) -> DbResult<()> {
    let mut conn = pool.get()?;
    apply_migrations(&mut conn)?;
    Ok(())
}

fn configure_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

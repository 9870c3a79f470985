//! Generic parameterized-statement execution helper.
//!
//! # Responsibility
//! - Run one SQL statement per call over a pooled connection, so repository
//!   code built on it contains no acquisition, cursor, or release logic.
//! - Map result rows to caller types through a row-mapping closure.
//!
//! # Invariants
//! - Exactly one connection is checked out per call and returned before the
//!   call completes, on success and on error alike.
//! - `query_one` enforces an exactly-one contract: zero matches and multiple
//!   matches are distinguishable errors, never a silent first-row pick.

use crate::db::{DbError, DbPool};
use rusqlite::{Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TemplateResult<T> = Result<T, TemplateError>;

/// Error from template-level statement execution.
#[derive(Debug)]
pub enum TemplateError {
    /// Pool checkout or SQLite failure.
    Db(DbError),
    /// A single-row query matched no rows.
    NoRows,
    /// A single-row query matched more than one row.
    TooManyRows,
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NoRows => write!(f, "single-row query matched no rows"),
            Self::TooManyRows => write!(f, "single-row query matched more than one row"),
        }
    }
}

impl Error for TemplateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NoRows => None,
            Self::TooManyRows => None,
        }
    }
}

impl From<DbError> for TemplateError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for TemplateError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<r2d2::Error> for TemplateError {
    fn from(value: r2d2::Error) -> Self {
        Self::Db(DbError::Pool(value))
    }
}

/// Reusable statement executor over an injected connection pool.
///
/// Each method checks out one connection, prepares and binds one statement,
/// and releases both by drop before returning. Callers only supply SQL,
/// parameters, and (for queries) a row mapper.
pub struct SqlTemplate {
    pool: DbPool,
}

impl SqlTemplate {
    /// Wraps the given pool. Pools are cheap handle clones, so templates can
    /// be created per component without coordination.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Executes one DML statement and returns the affected-row count.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> TemplateResult<usize> {
        let conn = self.pool.get()?;
        let changed = conn.execute(sql, params)?;
        Ok(changed)
    }

    /// Runs one query and maps every result row in store order.
    ///
    /// An empty result set yields an empty vector, not an error.
    pub fn query<T, P, F>(&self, sql: &str, params: P, map_row: F) -> TemplateResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(sql)?;
        let mapped = stmt.query_map(params, map_row)?;

        let mut values = Vec::new();
        for value in mapped {
            values.push(value?);
        }
        Ok(values)
    }

    /// Runs one query that must match exactly one row.
    ///
    /// # Errors
    /// - `TemplateError::NoRows` when nothing matches.
    /// - `TemplateError::TooManyRows` when a second row matches; the first
    ///   row is never returned in that case.
    pub fn query_one<T, P, F>(&self, sql: &str, params: P, map_row: F) -> TemplateResult<T>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;

        let value = match rows.next()? {
            Some(row) => map_row(row)?,
            None => return Err(TemplateError::NoRows),
        };
        if rows.next()?.is_some() {
            return Err(TemplateError::TooManyRows);
        }

        Ok(value)
    }
}

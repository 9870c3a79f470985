//! Employee repository contract and manual SQLite implementation.
//!
//! # Responsibility
//! - Define the five-operation data-access contract over the `Employee` table.
//! - Provide the low-level variant that prepares, binds, and maps rows by
//!   hand against `rusqlite`.
//!
//! # Invariants
//! - Every operation checks out one pooled connection and releases it before
//!   returning, on every exit path.
//! - Zero affected rows on update/delete means `NotFound`, never silent
//!   success.
//! - Returned records are fully populated from their row or not returned at
//!   all.

use crate::db::migrations::latest_version;
use crate::db::template::TemplateError;
use crate::db::{DbConnection, DbError, DbPool};
use crate::model::employee::{Employee, EmployeeId};
use log::{info, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, role FROM Employee";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Pool checkout or SQLite transport failure.
    Db(DbError),
    /// No stored row matches the given id.
    NotFound(EmployeeId),
    /// Persisted state violates the repository contract.
    InvalidData(String),
    /// The database has not been migrated to the expected schema version.
    UninitializedDatabase {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
            Self::UninitializedDatabase {
                expected_version,
                actual_version,
            } => write!(
                f,
                "employee repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "employee repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "employee repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
            Self::UninitializedDatabase { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<r2d2::Error> for RepoError {
    fn from(value: r2d2::Error) -> Self {
        Self::Db(DbError::Pool(value))
    }
}

impl From<TemplateError> for RepoError {
    fn from(value: TemplateError) -> Self {
        match value {
            TemplateError::Db(err) => Self::Db(err),
            // Row-count contract violations that the caller did not map to a
            // semantic outcome: with a unique id column these indicate wrong
            // stored state, not a wrong request.
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Data-access contract for the `Employee` table.
///
/// Implementations are interchangeable except on lookup misses: the manual
/// variant reports them as `Ok(None)`, the templated variant as
/// `Err(RepoError::NotFound)`. See the implementation docs.
pub trait EmployeeRepository {
    /// Inserts one record. The id must not already be stored.
    fn create_employee(&self, employee: &Employee) -> RepoResult<()>;
    /// Loads one record by id.
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Rewrites name and role for the record with `employee.id`.
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    /// Removes one record by id.
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()>;
    /// Loads every stored record in store order.
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
}

/// Manual SQLite-backed employee repository.
///
/// Each operation explicitly prepares its statement, binds positional
/// parameters, and extracts rows. Lookup misses are `Ok(None)`.
pub struct SqliteEmployeeRepository {
    pool: DbPool,
}

impl SqliteEmployeeRepository {
    /// Constructs a repository over a migrated database.
    ///
    /// Checks out one connection to verify the schema (version, table,
    /// columns) and returns it before the repository is handed to the caller.
    pub fn try_new(pool: DbPool) -> RepoResult<Self> {
        let conn = pool.get()?;
        ensure_employee_schema(&conn)?;
        drop(conn);
        Ok(Self { pool })
    }

    fn checkout(&self) -> RepoResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository {
    fn create_employee(&self, employee: &Employee) -> RepoResult<()> {
        let conn = self.checkout()?;
        conn.execute(
            "INSERT INTO Employee (id, name, role) VALUES (?1, ?2, ?3);",
            params![employee.id, employee.name.as_str(), employee.role.as_str()],
        )?;

        info!(
            "event=employee_create module=repo status=ok id={}",
            employee.id
        );
        Ok(())
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let conn = self.checkout()?;
        let mut stmt = conn.prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            let employee = map_employee_row(row)?;
            info!("event=employee_get module=repo status=ok id={id}");
            return Ok(Some(employee));
        }

        warn!("event=employee_get module=repo status=not_found id={id}");
        Ok(None)
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        let conn = self.checkout()?;
        let changed = conn.execute(
            "UPDATE Employee SET name = ?1, role = ?2 WHERE id = ?3;",
            params![employee.name.as_str(), employee.role.as_str(), employee.id],
        )?;

        if changed == 0 {
            warn!(
                "event=employee_update module=repo status=not_found id={}",
                employee.id
            );
            return Err(RepoError::NotFound(employee.id));
        }

        info!(
            "event=employee_update module=repo status=ok id={}",
            employee.id
        );
        Ok(())
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        let conn = self.checkout()?;
        let changed = conn.execute("DELETE FROM Employee WHERE id = ?1;", params![id])?;

        if changed == 0 {
            warn!("event=employee_delete module=repo status=not_found id={id}");
            return Err(RepoError::NotFound(id));
        }

        info!("event=employee_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let conn = self.checkout()?;
        let mut stmt = conn.prepare(EMPLOYEE_SELECT_SQL)?;
        let mut rows = stmt.query([])?;

        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(map_employee_row(row)?);
        }

        info!(
            "event=employee_list module=repo status=ok count={}",
            employees.len()
        );
        Ok(employees)
    }
}

/// Maps one `(id, name, role)` row to a record.
pub(crate) fn map_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        role: row.get("role")?,
    })
}

/// Verifies the connection points at a migrated database with the expected
/// `Employee` shape. Shared by both repository variants.
pub(crate) fn ensure_employee_schema(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedDatabase {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "Employee")? {
        return Err(RepoError::MissingRequiredTable("Employee"));
    }

    for column in ["id", "name", "role"] {
        if !table_has_column(conn, "Employee", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "Employee",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

//! Employee repository variant built on [`SqlTemplate`].
//!
//! # Responsibility
//! - Implement the employee contract with no hand-rolled acquisition,
//!   binding, or cursor code; every operation is one helper call plus a row
//!   mapper.
//!
//! # Invariants
//! - Speaks the same SQL as the manual variant against the same schema.
//! - Lookup misses surface as `Err(RepoError::NotFound)`, not `Ok(None)`:
//!   the helper's exactly-one contract is allowed to show through. This is
//!   the one deliberate behavioral difference between the two variants.

use crate::db::template::{SqlTemplate, TemplateError};
use crate::db::DbPool;
use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{
    ensure_employee_schema, map_employee_row, EmployeeRepository, RepoError, RepoResult,
    EMPLOYEE_SELECT_SQL,
};
use log::{info, warn};
use rusqlite::params;

/// Template-backed employee repository.
///
/// Interchangeable with the manual variant except for not-found signaling on
/// lookups (see module docs).
pub struct TemplateEmployeeRepository {
    template: SqlTemplate,
}

impl TemplateEmployeeRepository {
    /// Constructs a repository over a migrated database.
    ///
    /// Runs the same schema readiness checks as the manual variant before
    /// wrapping the pool in a [`SqlTemplate`].
    pub fn try_new(pool: DbPool) -> RepoResult<Self> {
        let conn = pool.get()?;
        ensure_employee_schema(&conn)?;
        drop(conn);

        Ok(Self {
            template: SqlTemplate::new(pool),
        })
    }
}

impl EmployeeRepository for TemplateEmployeeRepository {
    fn create_employee(&self, employee: &Employee) -> RepoResult<()> {
        self.template.execute(
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
        let lookup = self.template.query_one(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
            params![id],
            map_employee_row,
        );

        match lookup {
            Ok(employee) => {
                info!("event=employee_get module=repo status=ok id={id}");
                Ok(Some(employee))
            }
            Err(TemplateError::NoRows) => {
                warn!("event=employee_get module=repo status=not_found id={id}");
                Err(RepoError::NotFound(id))
            }
            Err(other) => Err(other.into()),
        }
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        let changed = self.template.execute(
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
        let changed = self
            .template
            .execute("DELETE FROM Employee WHERE id = ?1;", params![id])?;

        if changed == 0 {
            warn!("event=employee_delete module=repo status=not_found id={id}");
            return Err(RepoError::NotFound(id));
        }

        info!("event=employee_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let employees = self
            .template
            .query(EMPLOYEE_SELECT_SQL, [], map_employee_row)?;

        info!(
            "event=employee_list module=repo status=ok count={}",
            employees.len()
        );
        Ok(employees)
    }
}

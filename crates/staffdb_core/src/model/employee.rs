//! Employee record type.
//!
//! # Responsibility
//! - Hold the `(id, name, role)` triple persisted in the `Employee` table.
//! - Provide the human-readable rendering used by callers when printing
//!   records.
//!
//! # Invariants
//! - `id` uniquely identifies at most one stored row at a time.
//! - An in-memory value is independent of the stored row; mutating it has no
//!   storage effect until an update operation persists it.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Caller-assigned identifier for an employee record.
///
/// SQLite `INTEGER PRIMARY KEY` columns are 64-bit rowid aliases, so the
/// alias is `i64` rather than a narrower integer.
pub type EmployeeId = i64;

/// Plain employee record with no behavior beyond construction and rendering.
///
/// The store never generates identifiers; callers pick the `id` and own the
/// uniqueness decision up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Primary key in the `Employee` table.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Job role/title.
    pub role: String,
}

impl Employee {
    /// Creates a record from its three fields.
    ///
    /// No validation happens here: any id and any text, including empty
    /// strings, are accepted at this layer.
    pub fn new(id: EmployeeId, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
        }
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID = {}, Name = {}, Role = {}", self.id, self.name, self.role)
    }
}

//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the employee data-access contract (five operations, one table).
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Both implementations speak the same SQL against the same schema and are
//!   interchangeable behind [`employee_repo::EmployeeRepository`], except for
//!   the documented not-found signaling difference on lookups.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors; nothing is swallowed into logs.

pub mod employee_repo;
pub mod template_repo;

//! Core data-access logic for staffdb.
//! This crate owns the Employee schema, both repository variants, and the
//! SQL template they share a contract with.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::template::{SqlTemplate, TemplateError, TemplateResult};
pub use db::{open_pool, open_pool_in_memory, DbConnection, DbError, DbPool, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeId};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use repo::template_repo::TemplateEmployeeRepository;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

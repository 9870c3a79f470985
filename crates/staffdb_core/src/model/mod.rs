//! Domain model for employee records.
//!
//! # Responsibility
//! - Define the canonical record shape shared by both repository variants.
//!
//! # Invariants
//! - Every record is identified by a caller-assigned `EmployeeId`.
//! - The model performs no validation; storage constraints live in the schema.

pub mod employee;

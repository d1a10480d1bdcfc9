//! Domain model for person records.
//!
//! # Responsibility
//! - Define the canonical record shape used by store and service layers.
//! - Own shape-level validation that does not need storage access.
//!
//! # Invariants
//! - A persisted record always carries an id.
//! - Deletion is a hard delete; there are no tombstones.

pub mod person;

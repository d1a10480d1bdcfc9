//! Store layer: person persistence behind transaction scopes.
//!
//! # Responsibility
//! - Define the data access contract used by the service layer.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository instances only exist inside an explicit transaction scope.
//! - The storage UNIQUE constraint on `email` is the final uniqueness authority.
//! - Repository APIs carry no business rules beyond record shape validation.

pub mod person_repo;
pub mod person_store;

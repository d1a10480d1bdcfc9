//! Transport-agnostic API boundary.
//!
//! # Responsibility
//! - Translate boundary inputs (path ids, optional bodies) into service calls.
//! - Wrap results in the success/error envelope with a status code.
//!
//! # Invariants
//! - Callers never reach the store except through `PersonService`.
//! - `InvalidArgument` maps to 400, `NotFound` to 404, everything else to 500.

pub mod person_api;
pub mod response;

//! Core domain logic for the people registry.
//! This crate is the single source of truth for person record invariants.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::person_api::{HealthReport, PersonApi};
pub use api::response::{ApiReply, ApiResponse};
pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::person::{Person, PersonId, PersonValidationError};
pub use repo::person_repo::{PersonRepository, RepoError, RepoResult, SqlitePersonRepository};
pub use repo::person_store::{PersonStore, SqlitePersonStore};
pub use service::person_service::{ErrorKind, PersonService, ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Person use-case service.
//!
//! # Responsibility
//! - Validate candidate records and enforce email uniqueness.
//! - Enforce existence-before-mutate for updates and deletes.
//! - Run each check-then-write sequence inside one write transaction.
//!
//! # Invariants
//! - Pipeline order for `save`: shape validation, existence (updates), uniqueness, persist.
//! - Any failure aborts with no partial effect on storage.
//! - The service holds no state besides its store; it never caches reads.

use crate::model::person::{validate_id, Person, PersonId, PersonValidationError};
use crate::repo::person_repo::{PersonRepository, RepoError, RepoResult};
use crate::repo::person_store::PersonStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const DUPLICATE_EMAIL_MESSAGE: &str = "a person with this email already exists";

/// Coarse error classification consumed by boundary layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    StorageFault,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::StorageFault => "storage_fault",
        }
    }
}

/// Errors from person service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Missing/blank input, malformed id, or duplicate email.
    InvalidArgument(String),
    /// No current record holds this id.
    NotFound(PersonId),
    /// Unclassified storage failure, surfaced as-is.
    Storage(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::StorageFault,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "{message}"),
            Self::NotFound(id) => write!(f, "person not found with id: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersonValidationError> for ServiceError {
    fn from(value: PersonValidationError) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => err.into(),
            RepoError::DuplicateEmail(_) => Self::InvalidArgument(DUPLICATE_EMAIL_MESSAGE.into()),
            other => Self::Storage(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of the in-transaction part of `save`, kept separate from
/// `RepoError` so business rejections do not masquerade as storage faults.
enum SaveOutcome {
    Saved(Person),
    Rejected(ServiceError),
}

/// Person service facade over a transaction-scoped store.
pub struct PersonService<S: PersonStore> {
    store: S,
}

impl<S: PersonStore> PersonService<S> {
    /// Creates a service using the store chosen at startup.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists all persons ordered by ascending id.
    pub fn get_all(&self) -> ServiceResult<Vec<Person>> {
        Ok(self.store.read(|repo| repo.find_all())?)
    }

    /// Gets one person by id.
    ///
    /// # Errors
    /// - `InvalidArgument` for a non-positive id.
    /// - `NotFound` when no record holds `id`.
    pub fn get_by_id(&self, id: PersonId) -> ServiceResult<Person> {
        validate_id(id)?;
        self.store
            .read(|repo| repo.find_by_id(id))?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Number of persisted persons.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.store.read(|repo| repo.count())?)
    }

    /// Creates (no id) or fully replaces (id set) one person.
    ///
    /// The record is stored exactly as given; surrounding whitespace only
    /// matters for the blank checks and the email comparison.
    ///
    /// # Errors
    /// - `InvalidArgument` for blank fields, bad id, or an email held by
    ///   another record.
    /// - `NotFound` when updating an id with no current record.
    pub fn save(&self, person: &Person) -> ServiceResult<Person> {
        let started_at = Instant::now();
        let op = if person.is_transient() { "create" } else { "update" };

        let result = person
            .validate()
            .map_err(ServiceError::from)
            .and_then(|()| {
                let outcome = self.store.write(|repo| save_in_scope(repo, person))?;
                match outcome {
                    SaveOutcome::Saved(saved) => Ok(saved),
                    SaveOutcome::Rejected(err) => Err(err),
                }
            });

        log_outcome("person_save", op, started_at, &result);
        result
    }

    /// Deletes one person by id. Deletion is terminal.
    ///
    /// # Errors
    /// - `InvalidArgument` for a non-positive id.
    /// - `NotFound` when no record holds `id`.
    pub fn delete(&self, id: PersonId) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = validate_id(id).map_err(ServiceError::from).and_then(|()| {
            let existed = self.store.write(|repo| {
                if !repo.exists_by_id(id)? {
                    return Ok(false);
                }
                repo.delete_by_id(id)?;
                Ok(true)
            })?;
            if existed {
                Ok(())
            } else {
                Err(ServiceError::NotFound(id))
            }
        });

        log_outcome("person_delete", "delete", started_at, &result);
        result
    }
}

fn save_in_scope(repo: &dyn PersonRepository, candidate: &Person) -> RepoResult<SaveOutcome> {
    match candidate.id {
        None => {
            if repo.exists_by_email(&candidate.email)? {
                return Ok(SaveOutcome::Rejected(duplicate_email()));
            }
        }
        Some(id) => {
            if !repo.exists_by_id(id)? {
                return Ok(SaveOutcome::Rejected(ServiceError::NotFound(id)));
            }
            if let Some(holder) = repo.find_by_email(&candidate.email)? {
                if holder.id != Some(id) {
                    return Ok(SaveOutcome::Rejected(duplicate_email()));
                }
            }
        }
    }

    repo.save(candidate).map(SaveOutcome::Saved)
}

fn duplicate_email() -> ServiceError {
    ServiceError::InvalidArgument(DUPLICATE_EMAIL_MESSAGE.to_string())
}

fn log_outcome<T>(event: &str, op: &str, started_at: Instant, result: &ServiceResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event={event} module=service op={op} status=ok duration_ms={duration_ms}"),
        Err(err) => warn!(
            "event={event} module=service op={op} status=error duration_ms={duration_ms} error_code={}",
            err.kind().as_str()
        ),
    }
}

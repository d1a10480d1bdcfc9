//! Person endpoints expressed as plain functions.
//!
//! # Responsibility
//! - Parse path ids and reject absent bodies before calling the service.
//! - Produce one `ApiReply` per call, never panicking on bad input.

use super::response::ApiReply;
use crate::model::person::{Person, PersonId};
use crate::repo::person_store::PersonStore;
use crate::service::person_service::PersonService;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Liveness snapshot returned by `health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub store: String,
    pub timestamp_ms: u128,
}

/// Boundary facade over `PersonService`.
pub struct PersonApi<S: PersonStore> {
    service: PersonService<S>,
}

impl<S: PersonStore> PersonApi<S> {
    pub fn new(service: PersonService<S>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &PersonService<S> {
        &self.service
    }

    pub fn list(&self) -> ApiReply<Vec<Person>> {
        match self.service.get_all() {
            Ok(people) => ApiReply::ok("persons retrieved", people),
            Err(err) => ApiReply::from_service_error(&err),
        }
    }

    pub fn get(&self, path_id: &str) -> ApiReply<Person> {
        let id = match parse_path_id(path_id) {
            Ok(id) => id,
            Err(reply) => return reply,
        };
        match self.service.get_by_id(id) {
            Ok(person) => ApiReply::ok("person retrieved", person),
            Err(err) => ApiReply::from_service_error(&err),
        }
    }

    /// Creates a person. A body carrying an id is treated as new; the id is dropped.
    pub fn create(&self, body: Option<Person>) -> ApiReply<Person> {
        let Some(mut person) = body else {
            return missing_body();
        };
        person.id = None;
        match self.service.save(&person) {
            Ok(saved) => ApiReply::created("person created", saved),
            Err(err) => ApiReply::from_service_error(&err),
        }
    }

    /// Fully replaces the person at `path_id` with `body`.
    pub fn update(&self, path_id: &str, body: Option<Person>) -> ApiReply<Person> {
        let id = match parse_path_id(path_id) {
            Ok(id) => id,
            Err(reply) => return reply,
        };
        let Some(mut person) = body else {
            return missing_body();
        };
        person.id = Some(id);
        match self.service.save(&person) {
            Ok(saved) => ApiReply::ok("person updated", saved),
            Err(err) => ApiReply::from_service_error(&err),
        }
    }

    pub fn delete(&self, path_id: &str) -> ApiReply<()> {
        let id = match parse_path_id(path_id) {
            Ok(id) => id,
            Err(reply) => return reply,
        };
        match self.service.delete(id) {
            Ok(()) => ApiReply::ok_empty("person deleted"),
            Err(err) => ApiReply::from_service_error(&err),
        }
    }

    pub fn health(&self) -> ApiReply<HealthReport> {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        ApiReply::ok(
            "ok",
            HealthReport {
                status: "UP",
                version: crate::core_version(),
                store: self.service.store().describe(),
                timestamp_ms,
            },
        )
    }
}

fn parse_path_id<T>(raw: &str) -> Result<PersonId, ApiReply<T>> {
    raw.trim()
        .parse::<PersonId>()
        .map_err(|_| ApiReply::bad_request("invalid id format", "id must be a valid number"))
}

fn missing_body<T>() -> ApiReply<T> {
    ApiReply::bad_request("invalid data", "person must not be null")
}

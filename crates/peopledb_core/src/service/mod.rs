//! Core use-case services.
//!
//! # Responsibility
//! - Enforce business invariants above the repository layer.
//! - Keep API/boundary layers decoupled from storage details.

pub mod person_service;

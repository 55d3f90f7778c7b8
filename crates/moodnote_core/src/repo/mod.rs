//! Persistence boundary for notes.
//!
//! # Responsibility
//! - Define the storage contract consumed by services.
//! - Keep SQLite query details out of analysis and service code.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod note_repo;

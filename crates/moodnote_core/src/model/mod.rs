//! Domain model for notes and their analysis annotations.
//!
//! # Responsibility
//! - Define canonical data structures shared by analysis, storage and services.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Analysis attributes are only produced by the `analysis` module.

pub mod analysis;
pub mod note;

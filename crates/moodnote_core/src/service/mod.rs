//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate analysis and repository calls into use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from storage and analysis details.

pub mod note_service;

//! Core use-case services.
//!
//! # Responsibility
//! - Expose repository operations as use-case level APIs.
//! - Keep CLI and other callers decoupled from storage details.

pub mod student_service;

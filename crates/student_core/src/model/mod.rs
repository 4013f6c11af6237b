//! Domain model for student records.
//!
//! # Responsibility
//! - Define the record shape shared by repository, service and CLI layers.
//! - Keep field-level invariants next to the data they constrain.
//!
//! # Invariants
//! - A persisted student is always identified by a positive `StudentId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod student;

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract used by the student service.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Student::validate()` before persistence.
//! - A lookup miss is `Ok(None)`, never an error.

pub mod student_repo;

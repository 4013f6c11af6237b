//! Student use-case service.
//!
//! # Responsibility
//! - Provide list/get/save/delete entry points for callers.
//! - Delegate persistence to a repository implementation.
//!
//! # Invariants
//! - The service holds no state besides its repository.
//! - Repository results and errors are returned unchanged.
//! - A lookup miss is `Ok(None)`, not an error.

use crate::model::student::{Student, StudentId};
use crate::repo::student_repo::{RepoResult, StudentRepository};

/// Use-case service wrapper for student CRUD operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all students in repository order.
    pub fn get_all_students(&self) -> RepoResult<Vec<Student>> {
        self.repo.find_all()
    }

    /// Gets one student by ID; `None` when no such record exists.
    pub fn get_student_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.repo.find_by_id(id)
    }

    /// Creates or updates a student and returns the persisted record.
    pub fn save_student(&self, student: &Student) -> RepoResult<Student> {
        self.repo.save(student)
    }

    /// Deletes a student by ID.
    pub fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }
}

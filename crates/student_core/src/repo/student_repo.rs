//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/upsert/delete primitives over the `students` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Student::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `save` creates when the id is unset or unknown, and updates in place
//!   otherwise.
//! - `delete_by_id` on an unknown id is a no-op.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::student::{Student, StudentId, StudentValidationError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENTS_TABLE: &str = "students";
const REQUIRED_COLUMNS: &[&str] = &["id", "name", "email", "created_at", "updated_at"];

const STUDENT_SELECT_SQL: &str = "SELECT id, name, email FROM students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    /// Returns every stored student.
    fn find_all(&self) -> RepoResult<Vec<Student>>;
    /// Returns the student with `id`, or `None` when absent.
    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Creates or updates `student` and returns the persisted record.
    fn save(&self, student: &Student) -> RepoResult<Student>;
    /// Removes the student with `id`.
    fn delete_by_id(&self, id: StudentId) -> RepoResult<()>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Wraps a connection after checking that its schema is ready.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match what this repository queries.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_table_columns(conn, STUDENTS_TABLE, REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, student: &Student) -> RepoResult<Student> {
        student.validate()?;

        let mut stmt = self.conn.prepare(
            "INSERT INTO students (id, name, email)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                updated_at = (strftime('%s', 'now') * 1000)
             RETURNING id, name, email;",
        )?;
        let saved = stmt
            .query_row(
                params![student.id, student.name.as_str(), student.email.as_deref()],
                |row| {
                    Ok((
                        row.get::<_, i64>("id")?,
                        row.get::<_, String>("name")?,
                        row.get::<_, Option<String>>("email")?,
                    ))
                },
            )
            .optional()?;

        let Some((id, name, email)) = saved else {
            return Err(RepoError::InvalidData(
                "upsert returned no row for students".to_string(),
            ));
        };

        debug!(
            "event=student_save module=repo status=ok student_id={id} mode={}",
            if student.is_persisted() { "upsert" } else { "insert" }
        );
        Ok(Student {
            id: Some(id),
            name,
            email,
        })
    }

    fn delete_by_id(&self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id])?;

        if changed == 0 {
            debug!("event=student_delete module=repo status=noop student_id={id}");
        } else {
            debug!("event=student_delete module=repo status=ok student_id={id}");
        }
        Ok(())
    }
}

fn ensure_table_columns(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;

    for &column in columns {
        if !present.iter().any(|name| name.as_str() == column) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let id: i64 = row.get("id")?;
    let student = Student {
        id: Some(id),
        name: row.get("name")?,
        email: row.get("email")?,
    };
    student
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("row id={id}: {err}")))?;
    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::{RepoError, SqliteStudentRepository, StudentRepository};
    use crate::db::open_db_in_memory;
    use crate::model::student::Student;

    #[test]
    fn save_stores_name_and_email_verbatim() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteStudentRepository::try_new(&conn).unwrap();

        let saved = repo
            .save(&Student::new("  Grace  ").with_email("grace@example.com"))
            .unwrap();
        assert_eq!(saved.name, "  Grace  ");
        assert_eq!(saved.email.as_deref(), Some("grace@example.com"));
    }

    #[test]
    fn corrupt_row_is_reported_as_invalid_data() {
        let conn = open_db_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA ignore_check_constraints = ON;
             INSERT INTO students (id, name) VALUES (7, '   ');",
        )
        .unwrap();
        let repo = SqliteStudentRepository::try_new(&conn).unwrap();

        let err = repo.find_by_id(7).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("id=7")));
    }
}

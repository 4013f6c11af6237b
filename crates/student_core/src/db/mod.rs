//! Storage bootstrap for the student store.
//!
//! Callers never build a `rusqlite::Connection` themselves: `open_db` and
//! `open_db_in_memory` hand back a connection whose `students` schema is at
//! `migrations::latest_version()`, which is what
//! `SqliteStudentRepository::try_new` checks for.
//!
//! A store written by a newer build is refused rather than read with a
//! schema this build does not know.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the student store.
#[derive(Debug)]
pub enum DbError {
    /// Driver-level failure, passed through untouched.
    Sqlite(rusqlite::Error),
    /// `PRAGMA user_version` is ahead of the newest bundled migration.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "student store is at schema v{db_version}, this build only knows up to v{latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn schema_version_error_names_both_versions() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 4,
            latest_supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "student store is at schema v4, this build only knows up to v1"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn sqlite_error_keeps_driver_error_as_source() {
        let err = DbError::from(rusqlite::Error::InvalidQuery);
        assert!(err.to_string().starts_with("sqlite: "));
        assert!(err.source().is_some());
    }
}

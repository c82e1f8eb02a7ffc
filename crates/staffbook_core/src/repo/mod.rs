//! Active-record persistence over the staff tables.
//!
//! # Responsibility
//! - Map each entity kind onto its table through one generic code path.
//! - Keep one live record per primary key per kind via session-owned
//!   identity maps.
//! - Resolve the fixed foreign keys between departments, employees and
//!   reviews.
//!
//! # Invariants
//! - Every store read goes through `Session::materialize`.
//! - Update and delete require a persisted id; save requires a transient one.
//! - Store errors are carried unmodified inside `RepoError::Db`.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::{EntityKind, RecordId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_repo;
pub mod employee_repo;
pub mod entity;
pub mod identity_map;
pub mod record;
pub mod relations;
pub mod review_repo;
pub mod session;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by record lifecycle and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// Update or delete on a record that has no id.
    NotPersisted { kind: EntityKind },
    /// Save on a record that already has an id.
    AlreadyPersisted { kind: EntityKind, id: RecordId },
    /// Update matched no stored row.
    NotFound { kind: EntityKind, id: RecordId },
    /// A read returned new values for a record whose fields are borrowed.
    RecordBorrowed { kind: EntityKind, id: RecordId },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotPersisted { kind } => write!(f, "{kind} has not been persisted"),
            Self::AlreadyPersisted { kind, id } => {
                write!(f, "{kind} {id} is already persisted")
            }
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::RecordBorrowed { kind, id } => write!(
                f,
                "{kind} {id} is borrowed and cannot take the values just read"
            ),
            Self::InvalidData(message) => write!(f, "invalid stored record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotPersisted { .. }
            | Self::AlreadyPersisted { .. }
            | Self::NotFound { .. }
            | Self::RecordBorrowed { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
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

//! Repository error type.

use crate::db::DbError;
use crate::model::validation::EntityValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence, query and wiring operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntityValidationError),
    /// Store failure, carried as-is.
    Db(DbError),
    NotFound(Uuid),
    /// A single-result query matched more than one row.
    NonUniqueResult {
        query: &'static str,
        count: usize,
    },
    InvalidData(String),
    /// Sort property is not a mapped column of the queried entity.
    InvalidSort(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns the native SQLite error when the failure came from the store.
    pub fn as_sqlite(&self) -> Option<&rusqlite::Error> {
        match self {
            Self::Db(err) => err.as_sqlite(),
            _ => None,
        }
    }

    /// Returns whether this error was raised while wiring a repository.
    pub fn is_wiring_error(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredTable(_) | Self::MissingRequiredColumn { .. }
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entity not found: {id}"),
            Self::NonUniqueResult { query, count } => {
                write!(f, "query `{query}` expected at most one result, got {count}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::InvalidSort(property) => write!(f, "unsupported sort property `{property}`"),
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

impl From<EntityValidationError> for RepoError {
    fn from(value: EntityValidationError) -> Self {
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

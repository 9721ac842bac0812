//! Store-level error taxonomy.
//!
//! # Responsibility
//! - Classify every store failure as open, write or read.
//! - Carry the engine's extended result code when one exists.
//!
//! # Invariants
//! - No variant is ever retried by core; callers own retry policy.
//! - A `Read` error never comes with partial results.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Engine failure details for a failed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFailure {
    /// SQLite extended result code, when the engine produced one.
    pub code: Option<i32>,
    /// Human-readable engine message.
    pub message: String,
}

impl EngineFailure {
    /// Builds a failure that did not originate in the engine itself.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

impl From<&rusqlite::Error> for EngineFailure {
    fn from(value: &rusqlite::Error) -> Self {
        Self {
            code: value.sqlite_error().map(|err| err.extended_code),
            message: value.to_string(),
        }
    }
}

impl Display for EngineFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {code})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Error returned by note store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The database could not be opened or lacks the notes schema.
    Open(DbError),
    /// A write transaction did not commit; none of its inserts are durable.
    Write(EngineFailure),
    /// A read transaction or cursor failed; no results are usable.
    Read(EngineFailure),
}

impl StoreError {
    pub(crate) fn write(err: &rusqlite::Error) -> Self {
        Self::Write(err.into())
    }

    pub(crate) fn read(err: &rusqlite::Error) -> Self {
        Self::Read(err.into())
    }

    /// Engine result code, when present.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Open(DbError::Sqlite(err)) => err.sqlite_error().map(|err| err.extended_code),
            Self::Open(_) => None,
            Self::Write(failure) | Self::Read(failure) => failure.code,
        }
    }

    /// Stable short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Open(_) => "storage_open",
            Self::Write(_) => "storage_write",
            Self::Read(_) => "storage_read",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "error opening database: {err}"),
            Self::Write(failure) => write!(f, "error storing note: {failure}"),
            Self::Read(failure) => write!(f, "error in cursor request: {failure}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::Write(_) | Self::Read(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Open(value)
    }
}

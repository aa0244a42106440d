//! Error types for every table, operator and storage call.
//!
//! Validation failures never leave a table half-modified: an operator either
//! returns a fresh [`super::Table`] or one of these errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::schema::Domain;

/// Result type used across the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum Error {
    /// Two tables (or two columns) disagree on arity or domains.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("arity mismatch: expected {expected} values, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("null value in column '{column}'")]
    NullValue { column: String },

    #[error("type mismatch in column '{column}': expected {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: Domain,
        found: String,
    },

    #[error("attribute '{0}' does not exist")]
    AttributeNotFound(String),

    #[error("attribute '{0}' appears more than once")]
    DuplicateAttribute(String),

    #[error("unknown domain '{0}'")]
    UnknownDomain(String),

    #[error("unknown index kind '{0}', expected none, tree or hash")]
    UnknownIndexKind(String),

    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error("invalid condition '{condition}': {reason}")]
    InvalidCondition { condition: String, reason: String },

    #[error("invalid join: {0}")]
    InvalidJoin(String),

    #[error("no common attributes between '{left}' and '{right}'")]
    NoCommonAttributes { left: String, right: String },

    /// An indexed operation was requested on a table built with
    /// [`super::IndexKind::NoIndex`].
    #[error("table '{0}' has no index")]
    IndexUnavailable(String),

    #[error("invalid value '{value}' for {name}")]
    InvalidConfig { name: String, value: String },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Failures of the snapshot and tuple store adapters.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot encoding error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("table '{name}' not found at {path}")]
    NotFound { name: String, path: PathBuf },

    #[error("record {index} out of bounds, store holds {len}")]
    RecordOutOfBounds { index: usize, len: usize },

    #[error("value in column '{column}' needs {actual} bytes, field width is {width}")]
    FieldTooWide {
        column: String,
        width: usize,
        actual: usize,
    },

    #[error("corrupted record: {0}")]
    Corrupted(String),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Persistence(PersistenceError::Io(error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Persistence(PersistenceError::Serialization(error))
    }
}

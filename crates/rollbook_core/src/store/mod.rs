//! File-backed record store.
//!
//! # Responsibility
//! - Bind one in-memory record to one file and sync them on demand.
//! - Scan a directory of record files into an in-memory collection.
//!
//! # Invariants
//! - One file per record; the file holds a full snapshot of the record.
//! - Errors surface unchanged to callers, except that `load` on a missing
//!   file writes the record instead of failing.
//! - A failed path change leaves the old file in place.

use crate::model::record::{RecordKind, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod codec;
pub mod collection;
pub mod record_file;

pub use codec::{FORMAT_VERSION, RECORD_EXTENSION};
pub use collection::Collection;
pub use record_file::RecordFile;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy shared by store, collection and membership operations.
#[derive(Debug)]
pub enum StoreError {
    /// A path expected to exist does not.
    NotFound(PathBuf),
    /// File bytes do not decode into a valid record.
    CorruptData { path: PathBuf, message: String },
    /// Wrong record kind for a kind-specific operation.
    UnsupportedType {
        expected: &'static str,
        found: RecordKind,
    },
    /// Member or record already present where uniqueness was required.
    Duplicate(PathBuf),
    /// Record payload rejected before write.
    Validation(ValidationError),
    /// Any other filesystem failure.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Maps `ErrorKind::NotFound` to [`StoreError::NotFound`], anything else to `Io`.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(path);
        }
        Self::Io { path, source }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptData {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Stable short code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::CorruptData { .. } => "corrupt_data",
            Self::UnsupportedType { .. } => "unsupported_type",
            Self::Duplicate(_) => "duplicate",
            Self::Validation(_) => "validation",
            Self::Io { .. } => "io",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "not found: {}", path.display()),
            Self::CorruptData { path, message } => {
                write!(f, "corrupt record file `{}`: {message}", path.display())
            }
            Self::UnsupportedType { expected, found } => {
                write!(f, "unsupported record type: expected {expected}, found {found}")
            }
            Self::Duplicate(path) => write!(f, "already present: {}", path.display()),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "i/o error at `{}`: {source}", path.display()),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

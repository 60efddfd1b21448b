//! Load/dump/construct operations binding a record to its file.
//!
//! # Invariants
//! - `dump` truncates and rewrites the whole file.
//! - `load` on a missing file writes the current record instead of failing.
//! - `set_path` to the current path never touches the filesystem.
//! - `set_path` writes the new file before removing the old one, so a failed
//!   change leaves the old file and the in-memory path untouched.
//! - `set_path` never deletes the file it just wrote: a new path naming the
//!   current file (another spelling, a case variant) only rebinds.
//! - `set_path` never overwrites another record's file.

use crate::model::record::{AnyRecord, Record, RecordKind};
use crate::model::section::Section;
use crate::model::student::Student;
use crate::model::teacher::Teacher;
use crate::store::codec;
use crate::store::{StoreError, StoreResult};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Store operations available on every [`Record`].
pub trait RecordFile: Record + Sized {
    /// Reads and decodes the record stored at `path`.
    ///
    /// # Errors
    /// - `NotFound` when `path` does not exist.
    /// - `CorruptData` when the bytes do not decode into a valid record.
    /// - `UnsupportedType` when the file holds another record kind.
    fn construct(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let record = codec::decode::<Self>(path, &bytes)?;
        debug!(
            "event=record_construct module=store status=ok kind={} bytes={}",
            Self::KIND,
            bytes.len()
        );
        Ok(record)
    }

    /// Replaces every field with what is stored at the current path.
    ///
    /// When the file does not exist yet, writes the record there instead and
    /// leaves it unchanged.
    fn load(&mut self) -> StoreResult<&mut Self> {
        match Self::construct(self.path()) {
            Ok(fresh) => {
                *self = fresh;
                Ok(self)
            }
            Err(StoreError::NotFound(_)) => {
                debug!(
                    "event=record_load module=store status=created kind={}",
                    Self::KIND
                );
                self.dump()?;
                Ok(self)
            }
            Err(err) => Err(err),
        }
    }

    /// Writes a full snapshot to the current path, overwriting existing content.
    fn dump(&self) -> StoreResult<()> {
        self.validate()?;
        let bytes = codec::encode(self)?;
        write_file(self.path(), &bytes)?;
        debug!(
            "event=record_dump module=store status=ok kind={} bytes={}",
            Self::KIND,
            bytes.len()
        );
        Ok(())
    }

    /// Moves the record to `new_path`.
    ///
    /// # Errors
    /// - `NotFound` when the current file does not exist; nothing changes.
    /// - `Duplicate` when `new_path` already holds a different file; nothing
    ///   changes.
    /// - `Validation`/`Io` when the new file cannot be written; the old file
    ///   and the in-memory path are kept.
    fn set_path(&mut self, new_path: impl Into<PathBuf>) -> StoreResult<()> {
        let new_path = new_path.into();
        if new_path.as_path() == self.path() {
            return Ok(());
        }

        let old_path = self.path().to_path_buf();
        let old_meta =
            fs::metadata(&old_path).map_err(|err| StoreError::from_read(&old_path, err))?;

        let aliased = match fs::metadata(&new_path) {
            Ok(new_meta) => {
                if !same_file(&old_path, &old_meta, &new_path, &new_meta) {
                    return Err(StoreError::Duplicate(new_path));
                }
                true
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => false,
            Err(err) => return Err(StoreError::io(new_path, err)),
        };

        self.validate()?;
        let bytes = codec::encode(self)?;
        write_file(&new_path, &bytes)?;

        if aliased {
            self.bind_path(new_path);
            info!(
                "event=record_move module=store status=rebound kind={}",
                Self::KIND
            );
            return Ok(());
        }

        if let Err(err) = fs::remove_file(&old_path) {
            if let Err(cleanup) = fs::remove_file(&new_path) {
                warn!(
                    "event=record_move module=store status=error kind={} error_code=rollback_failed error={}",
                    Self::KIND,
                    cleanup
                );
            }
            return Err(StoreError::from_read(old_path, err));
        }

        self.bind_path(new_path);
        info!(
            "event=record_move module=store status=ok kind={}",
            Self::KIND
        );
        Ok(())
    }

    /// Deletes the backing file.
    ///
    /// # Errors
    /// - `NotFound` when the file does not exist.
    fn remove(&self) -> StoreResult<()> {
        fs::remove_file(self.path()).map_err(|err| StoreError::from_read(self.path(), err))?;
        info!(
            "event=record_remove module=store status=ok kind={}",
            Self::KIND
        );
        Ok(())
    }

    /// Returns whether the backing file currently exists.
    fn exists(&self) -> bool {
        self.path().is_file()
    }
}

impl<T: Record> RecordFile for T {}

impl AnyRecord {
    /// Reads a student, teacher or section from `path`, whichever it holds.
    ///
    /// # Errors
    /// - `UnsupportedType` when the file holds settings or app state.
    pub fn construct(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let (kind, body) = codec::decode_envelope(path, &bytes)?;
        match kind {
            RecordKind::Student => Ok(Self::Student(codec::decode_body::<Student>(path, body)?)),
            RecordKind::Teacher => Ok(Self::Teacher(codec::decode_body::<Teacher>(path, body)?)),
            RecordKind::Section => Ok(Self::Section(codec::decode_body::<Section>(path, body)?)),
            other => Err(StoreError::UnsupportedType {
                expected: "student, teacher or section",
                found: other,
            }),
        }
    }

    pub fn dump(&self) -> StoreResult<()> {
        match self {
            Self::Student(student) => student.dump(),
            Self::Teacher(teacher) => teacher.dump(),
            Self::Section(section) => section.dump(),
        }
    }
}

fn read_file(path: &Path) -> StoreResult<Vec<u8>> {
    fs::read(path).map_err(|err| StoreError::from_read(path, err))
}

fn write_file(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    fs::write(path, bytes).map_err(|err| StoreError::io(path, err))
}

fn same_file(
    left: &Path,
    left_meta: &fs::Metadata,
    right: &Path,
    right_meta: &fs::Metadata,
) -> bool {
    if same_inode(left_meta, right_meta) {
        return true;
    }
    match (fs::canonicalize(left), fs::canonicalize(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

#[cfg(unix)]
fn same_inode(left: &fs::Metadata, right: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    left.dev() == right.dev() && left.ino() == right.ino()
}

#[cfg(not(unix))]
fn same_inode(_left: &fs::Metadata, _right: &fs::Metadata) -> bool {
    false
}

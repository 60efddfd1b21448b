//! Directory-scanning collection loader.
//!
//! # Responsibility
//! - Materialize every record file of one kind under a directory.
//! - Offer lookup-on-demand for path references into the collection.
//!
//! # Invariants
//! - `load` is a full rescan; the list is replaced, never merged.
//! - A corrupt file aborts the whole load and the previous list is kept.
//! - Records are ordered by file name after every load.

use crate::store::codec::RECORD_EXTENSION;
use crate::store::record_file::RecordFile;
use crate::store::{StoreError, StoreResult};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// In-memory list of every record of kind `T` found in one directory.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    dir: PathBuf,
    records: Vec<T>,
}

impl<T: RecordFile> Collection<T> {
    /// Creates an empty, unloaded collection bound to `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            records: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Rescans the directory and replaces the in-memory list.
    ///
    /// # Errors
    /// - `NotFound` when the directory does not exist.
    /// - The first record error (`CorruptData`, `UnsupportedType`, ...);
    ///   the previous list is left untouched.
    pub fn load(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();

        let paths = match self.record_paths() {
            Ok(paths) => paths,
            Err(err) => {
                error!(
                    "event=collection_load module=store status=error kind={} error_code={} error={}",
                    T::KIND,
                    err.code(),
                    err
                );
                return Err(err);
            }
        };

        let mut records = Vec::with_capacity(paths.len());
        for path in &paths {
            match T::construct(path) {
                Ok(record) => records.push(record),
                Err(err) => {
                    error!(
                        "event=collection_load module=store status=error kind={} duration_ms={} error_code={} error={}",
                        T::KIND,
                        started_at.elapsed().as_millis(),
                        err.code(),
                        err
                    );
                    return Err(err);
                }
            }
        }

        self.records = records;
        info!(
            "event=collection_load module=store status=ok kind={} count={} duration_ms={}",
            T::KIND,
            self.records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolves a path reference against the loaded records.
    pub fn get(&self, path: &Path) -> Option<&T> {
        self.records.iter().find(|record| record.path() == path)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut T> {
        self.records.iter_mut().find(|record| record.path() == path)
    }

    /// Inserts a record, replacing any loaded record with the same path.
    pub fn upsert(&mut self, record: T) {
        match self.records.iter().position(|existing| existing.path() == record.path()) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
    }

    /// Takes a record out of the in-memory list. The file is left alone.
    pub fn take(&mut self, path: &Path) -> Option<T> {
        let index = self.records.iter().position(|record| record.path() == path)?;
        Some(self.records.remove(index))
    }

    /// Drops in-memory records whose file no longer exists.
    ///
    /// Returns the number of records dropped.
    pub fn prune_missing(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.exists());
        before - self.records.len()
    }

    fn record_paths(&self) -> StoreResult<Vec<PathBuf>> {
        let entries =
            fs::read_dir(&self.dir).map_err(|err| StoreError::from_read(&self.dir, err))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io(&self.dir, err))?;
            let path = entry.path();
            if is_record_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn is_record_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|extension| extension == RECORD_EXTENSION)
}

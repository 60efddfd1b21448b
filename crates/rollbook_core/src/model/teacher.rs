//! Teacher record.

use crate::model::person::Person;
use crate::model::record::{Record, RecordKind, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One section a teacher teaches, cached by name for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaughtSection {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(skip)]
    path: PathBuf,
    #[serde(flatten)]
    pub person: Person,
    /// Section this teacher advises, by path. May dangle.
    pub advisory: Option<PathBuf>,
    taught_sections: Vec<TaughtSection>,
}

impl Teacher {
    pub fn new(path: impl Into<PathBuf>, person: Person) -> Self {
        Self {
            path: path.into(),
            person,
            advisory: None,
            taught_sections: Vec::new(),
        }
    }

    pub fn taught_sections(&self) -> &[TaughtSection] {
        &self.taught_sections
    }

    /// Records a taught section. Returns `false` when the path is already listed.
    pub fn add_taught_section(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.teaches(&path) {
            return false;
        }
        self.taught_sections.push(TaughtSection {
            name: name.into(),
            path,
        });
        true
    }

    /// Removes a taught section by path. Returns `false` when it was not listed.
    pub fn remove_taught_section(&mut self, path: &Path) -> bool {
        let before = self.taught_sections.len();
        self.taught_sections.retain(|section| section.path != path);
        self.taught_sections.len() != before
    }

    pub fn teaches(&self, path: &Path) -> bool {
        self.taught_sections.iter().any(|section| section.path == path)
    }

    /// Drops advisory and taught-section references whose files are gone.
    ///
    /// Returns the number of references removed.
    pub fn prune_dangling(&mut self) -> usize {
        let mut removed = 0;
        if self.advisory.as_ref().is_some_and(|path| !path.exists()) {
            self.advisory = None;
            removed += 1;
        }
        let before = self.taught_sections.len();
        self.taught_sections.retain(|section| section.path.exists());
        removed + (before - self.taught_sections.len())
    }
}

impl Record for Teacher {
    const KIND: RecordKind = RecordKind::Teacher;

    fn path(&self) -> &Path {
        &self.path
    }

    fn bind_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath);
        }
        self.person.validate()
    }

    fn display_name(&self) -> Option<String> {
        Some(self.person.display_name())
    }
}

//! Student record.

use crate::model::grade::{GradeLevel, SchoolYear};
use crate::model::person::Person;
use crate::model::record::{Record, RecordKind, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(skip)]
    path: PathBuf,
    #[serde(flatten)]
    pub person: Person,
    /// Learner reference number.
    pub lrn: String,
    pub grade: GradeLevel,
    pub school_year: SchoolYear,
    /// Parent/guardian names.
    pub guardians: Vec<String>,
    /// Enrolled section, by path. May dangle.
    pub section: Option<PathBuf>,
}

impl Student {
    pub fn new(
        path: impl Into<PathBuf>,
        person: Person,
        lrn: impl Into<String>,
        grade: GradeLevel,
        school_year: SchoolYear,
    ) -> Self {
        Self {
            path: path.into(),
            person,
            lrn: lrn.into(),
            grade,
            school_year,
            guardians: Vec::new(),
            section: None,
        }
    }

    /// Drops the section reference if its file no longer exists.
    ///
    /// Returns the number of references removed.
    pub fn prune_dangling(&mut self) -> usize {
        match &self.section {
            Some(section) if !section.exists() => {
                self.section = None;
                1
            }
            _ => 0,
        }
    }
}

impl Record for Student {
    const KIND: RecordKind = RecordKind::Student;

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

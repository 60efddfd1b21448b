//! Record identity, kind tags and validation shared by every persisted type.
//!
//! # Responsibility
//! - Define the `Record` contract the store and collection loader work against.
//! - Provide the heterogeneous `AnyRecord` variant for mixed lists.
//!
//! # Invariants
//! - A record's path is its only identity; two records are the same iff their
//!   paths match.
//! - The path is never part of the serialized body; it is bound from the file
//!   location on read.

use crate::model::section::Section;
use crate::model::student::Student;
use crate::model::teacher::Teacher;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Kind tag written into every record file envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Student,
    Teacher,
    Section,
    Settings,
    AppState,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Section => "section",
            Self::Settings => "settings",
            Self::AppState => "app_state",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain validation failures for record payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Record path is empty.
    EmptyPath,
    /// Person first name is blank.
    BlankFirstName,
    /// Section name is blank.
    BlankSectionName,
    /// Same path listed twice in one section member list.
    DuplicateMember(PathBuf),
    /// Section adviser is also listed as a regular teacher.
    AdviserListedAsTeacher(PathBuf),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "record path cannot be empty"),
            Self::BlankFirstName => write!(f, "first name cannot be blank"),
            Self::BlankSectionName => write!(f, "section name cannot be blank"),
            Self::DuplicateMember(path) => {
                write!(f, "member `{}` is listed more than once", path.display())
            }
            Self::AdviserListedAsTeacher(path) => write!(
                f,
                "adviser `{}` must not also be listed as a teacher",
                path.display()
            ),
        }
    }
}

impl Error for ValidationError {}

/// Failure to parse an enumerated field from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError {
    pub field: &'static str,
    pub value: String,
}

impl Display for ParseFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} value `{}`", self.field, self.value)
    }
}

impl Error for ParseFieldError {}

/// A persistable record bound to exactly one file path.
///
/// Store operations are provided by [`crate::store::RecordFile`], which is
/// implemented for every `Record`.
pub trait Record: Serialize + DeserializeOwned {
    /// Tag written into the file envelope and checked on read.
    const KIND: RecordKind;

    /// Current backing file path.
    fn path(&self) -> &Path;

    /// Rebinds the in-memory path without touching the filesystem.
    ///
    /// Only the store uses this; callers change paths through
    /// `RecordFile::set_path`.
    fn bind_path(&mut self, path: PathBuf);

    /// Checks payload invariants before write and after read.
    fn validate(&self) -> Result<(), ValidationError> {
        if self.path().as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath);
        }
        Ok(())
    }

    /// Human-facing name, if the record has one.
    fn display_name(&self) -> Option<String> {
        None
    }
}

/// One record of any roster kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyRecord {
    Student(Student),
    Teacher(Teacher),
    Section(Section),
}

impl AnyRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Student(_) => RecordKind::Student,
            Self::Teacher(_) => RecordKind::Teacher,
            Self::Section(_) => RecordKind::Section,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Student(student) => student.path(),
            Self::Teacher(teacher) => teacher.path(),
            Self::Section(section) => section.path(),
        }
    }

    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Student(student) => student.display_name(),
            Self::Teacher(teacher) => teacher.display_name(),
            Self::Section(section) => section.display_name(),
        }
    }

    /// Returns whether both records share the same identity (path).
    pub fn same_record(&self, other: &AnyRecord) -> bool {
        self.path() == other.path()
    }
}

impl From<Student> for AnyRecord {
    fn from(value: Student) -> Self {
        Self::Student(value)
    }
}

impl From<Teacher> for AnyRecord {
    fn from(value: Teacher) -> Self {
        Self::Teacher(value)
    }
}

impl From<Section> for AnyRecord {
    fn from(value: Section) -> Self {
        Self::Section(value)
    }
}

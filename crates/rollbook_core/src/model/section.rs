//! Section record and its membership rules.
//!
//! # Responsibility
//! - Hold a section's adviser, teacher and student references by path.
//! - Enforce member-list uniqueness on insertion.
//!
//! # Invariants
//! - Teacher and student lists never contain the same path twice.
//! - The adviser path is never also in the teacher list.
//! - Membership changes never touch the member's own record; keeping the
//!   other side in sync is the caller's job (see `service::roster_service`).

use crate::model::grade::GradeLevel;
use crate::model::record::{AnyRecord, Record, RecordKind, ValidationError};
use crate::model::student::Student;
use crate::model::teacher::Teacher;
use crate::store::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const MEMBER_KINDS: &str = "student or teacher";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(skip)]
    path: PathBuf,
    pub name: String,
    pub grade: GradeLevel,
    adviser: Option<PathBuf>,
    teachers: Vec<PathBuf>,
    students: Vec<PathBuf>,
}

impl Section {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, grade: GradeLevel) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            grade,
            adviser: None,
            teachers: Vec::new(),
            students: Vec::new(),
        }
    }

    pub fn adviser(&self) -> Option<&Path> {
        self.adviser.as_deref()
    }

    pub fn teachers(&self) -> &[PathBuf] {
        &self.teachers
    }

    pub fn students(&self) -> &[PathBuf] {
        &self.students
    }

    /// Sets or clears the adviser. A new adviser is dropped from the teacher list.
    pub fn set_adviser(&mut self, adviser: Option<&Path>) {
        if let Some(path) = adviser {
            self.teachers.retain(|teacher| teacher != path);
        }
        self.adviser = adviser.map(Path::to_path_buf);
    }

    pub fn has_member(&self, path: &Path) -> bool {
        self.students.iter().any(|student| student == path)
            || self.teachers.iter().any(|teacher| teacher == path)
    }

    /// Adds a student path if absent. Returns `false` when already listed.
    pub fn add_student(&mut self, student: &Student) -> bool {
        push_unique(&mut self.students, student.path())
    }

    /// Adds a teacher path unless already listed or already the adviser.
    pub fn add_teacher(&mut self, teacher: &Teacher) -> bool {
        if self.adviser.as_deref() == Some(teacher.path()) {
            return false;
        }
        push_unique(&mut self.teachers, teacher.path())
    }

    /// Adds a student or teacher, silently skipping members already present.
    ///
    /// # Errors
    /// - `UnsupportedType` when `member` is a section.
    pub fn add_member(&mut self, member: &AnyRecord) -> StoreResult<()> {
        match member {
            AnyRecord::Student(student) => {
                self.add_student(student);
                Ok(())
            }
            AnyRecord::Teacher(teacher) => {
                self.add_teacher(teacher);
                Ok(())
            }
            AnyRecord::Section(_) => Err(unsupported(member)),
        }
    }

    /// Adds a student or teacher, failing when it is already present.
    ///
    /// # Errors
    /// - `Duplicate` when the path is already listed (or is the adviser).
    /// - `UnsupportedType` when `member` is a section.
    pub fn try_add_member(&mut self, member: &AnyRecord) -> StoreResult<()> {
        let added = match member {
            AnyRecord::Student(student) => self.add_student(student),
            AnyRecord::Teacher(teacher) => self.add_teacher(teacher),
            AnyRecord::Section(_) => return Err(unsupported(member)),
        };
        if !added {
            return Err(StoreError::Duplicate(member.path().to_path_buf()));
        }
        Ok(())
    }

    pub fn remove_student(&mut self, student: &Student) -> StoreResult<()> {
        remove_path(&mut self.students, student.path())
    }

    pub fn remove_teacher(&mut self, teacher: &Teacher) -> StoreResult<()> {
        remove_path(&mut self.teachers, teacher.path())
    }

    /// Removes a student or teacher by path.
    ///
    /// # Errors
    /// - `NotFound` when the member is not listed.
    /// - `UnsupportedType` when `member` is a section.
    pub fn remove_member(&mut self, member: &AnyRecord) -> StoreResult<()> {
        match member {
            AnyRecord::Student(student) => self.remove_student(student),
            AnyRecord::Teacher(teacher) => self.remove_teacher(teacher),
            AnyRecord::Section(_) => Err(unsupported(member)),
        }
    }

    /// Drops adviser, teacher and student references whose files are gone.
    ///
    /// Returns the number of references removed.
    pub fn prune_dangling(&mut self) -> usize {
        let mut removed = 0;
        if self.adviser.as_ref().is_some_and(|path| !path.exists()) {
            self.adviser = None;
            removed += 1;
        }
        let before = self.teachers.len() + self.students.len();
        self.teachers.retain(|path| path.exists());
        self.students.retain(|path| path.exists());
        removed + (before - self.teachers.len() - self.students.len())
    }
}

impl Record for Section {
    const KIND: RecordKind = RecordKind::Section;

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
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankSectionName);
        }
        ensure_unique(&self.teachers)?;
        ensure_unique(&self.students)?;
        if let Some(adviser) = &self.adviser {
            if self.teachers.contains(adviser) {
                return Err(ValidationError::AdviserListedAsTeacher(adviser.clone()));
            }
        }
        Ok(())
    }

    fn display_name(&self) -> Option<String> {
        Some(format!("{} - {}", self.grade, self.name))
    }
}

fn push_unique(list: &mut Vec<PathBuf>, path: &Path) -> bool {
    if list.iter().any(|existing| existing == path) {
        return false;
    }
    list.push(path.to_path_buf());
    true
}

fn remove_path(list: &mut Vec<PathBuf>, path: &Path) -> StoreResult<()> {
    let Some(index) = list.iter().position(|existing| existing == path) else {
        return Err(StoreError::NotFound(path.to_path_buf()));
    };
    list.remove(index);
    Ok(())
}

fn ensure_unique(list: &[PathBuf]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(list.len());
    for path in list {
        if !seen.insert(path) {
            return Err(ValidationError::DuplicateMember(path.clone()));
        }
    }
    Ok(())
}

fn unsupported(member: &AnyRecord) -> StoreError {
    StoreError::UnsupportedType {
        expected: MEMBER_KINDS,
        found: member.kind(),
    }
}

//! Application context: data layout, settings, UI state and loaded rosters.
//!
//! # Responsibility
//! - Own every piece of state the presentation shell needs, created once at
//!   startup and persisted at shutdown.
//! - Place new records at their conventional paths.
//! - Run the stale-reference cleanup before lists are displayed.
//!
//! # Invariants
//! - All data lives under one root directory.
//! - `open` never fails because settings or app state files are missing.

use crate::model::app_state::{AppState, Settings};
use crate::model::grade::{GradeLevel, SchoolYear};
use crate::model::person::Person;
use crate::model::record::{AnyRecord, Record, RecordKind};
use crate::model::section::Section;
use crate::model::student::Student;
use crate::model::teacher::Teacher;
use crate::search::filter::{search, SearchFilters};
use crate::service::naming::{person_file_name, section_file_name};
use crate::store::{Collection, RecordFile, StoreError, StoreResult};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const DEFAULT_DATA_ROOT: &str = "data";
const APP_STATE_FILE: &str = "appstate.rec";
const SETTINGS_FILE: &str = "settings.rec";
const SECTIONS_DIR: &str = "sections";
const STUDENTS_DIR: &str = "students";
const TEACHERS_DIR: &str = "teachers";

/// Fixed file layout under a data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub root: PathBuf,
    pub app_state: PathBuf,
    pub settings: PathBuf,
    pub sections: PathBuf,
    pub students: PathBuf,
    pub teachers: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            app_state: root.join(APP_STATE_FILE),
            settings: root.join(SETTINGS_FILE),
            sections: root.join(SECTIONS_DIR),
            students: root.join(STUDENTS_DIR),
            teachers: root.join(TEACHERS_DIR),
            root,
        }
    }

    /// Creates the root and the three collection directories if missing.
    pub fn ensure_dirs(&self) -> StoreResult<()> {
        for dir in [&self.sections, &self.students, &self.teachers] {
            fs::create_dir_all(dir).map_err(|err| StoreError::io(dir, err))?;
        }
        Ok(())
    }

    pub fn student_path(&self, person: &Person) -> PathBuf {
        self.students.join(person_file_name(person))
    }

    pub fn teacher_path(&self, person: &Person) -> PathBuf {
        self.teachers.join(person_file_name(person))
    }

    pub fn section_path(&self, grade: GradeLevel, name: &str) -> PathBuf {
        self.sections.join(section_file_name(grade, name))
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_ROOT)
    }
}

/// Everything the presentation shell works with, opened from one data root.
#[derive(Debug)]
pub struct AppContext {
    paths: DataPaths,
    pub settings: Settings,
    pub app_state: AppState,
    pub students: Collection<Student>,
    pub teachers: Collection<Teacher>,
    pub sections: Collection<Section>,
}

impl AppContext {
    /// Opens (creating if needed) the data root and loads every collection.
    ///
    /// Missing settings and app state files are created with defaults.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let started_at = Instant::now();
        let paths = DataPaths::new(root);

        let result = Self::open_paths(paths);
        match &result {
            Ok(context) => info!(
                "event=context_open module=service status=ok students={} teachers={} sections={} duration_ms={}",
                context.students.len(),
                context.teachers.len(),
                context.sections.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=context_open module=service status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        result
    }

    fn open_paths(paths: DataPaths) -> StoreResult<Self> {
        paths.ensure_dirs()?;

        let mut settings = Settings::new(&paths.settings);
        settings.load()?;
        let mut app_state = AppState::new(&paths.app_state);
        app_state.load()?;

        let mut context = Self {
            students: Collection::new(&paths.students),
            teachers: Collection::new(&paths.teachers),
            sections: Collection::new(&paths.sections),
            paths,
            settings,
            app_state,
        };
        context.reload_collections()?;
        Ok(context)
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Rescans all three collection directories.
    pub fn reload_collections(&mut self) -> StoreResult<()> {
        self.sections.load()?;
        self.students.load()?;
        self.teachers.load()
    }

    /// Re-reads settings from disk.
    pub fn reload_settings(&mut self) -> StoreResult<()> {
        self.settings.load()?;
        Ok(())
    }

    /// Writes a new student at its conventional path and adds it to the roster.
    ///
    /// # Errors
    /// - `Duplicate` when a file already exists at that path.
    pub fn add_student(
        &mut self,
        person: Person,
        lrn: impl Into<String>,
        grade: GradeLevel,
        school_year: SchoolYear,
    ) -> StoreResult<PathBuf> {
        let path = self.paths.student_path(&person);
        let student = Student::new(path, person, lrn, grade, school_year);
        create_new(&student)?;
        let path = student.path().to_path_buf();
        self.students.upsert(student);
        Ok(path)
    }

    /// Writes a new teacher at its conventional path and adds it to the roster.
    ///
    /// # Errors
    /// - `Duplicate` when a file already exists at that path.
    pub fn add_teacher(&mut self, person: Person) -> StoreResult<PathBuf> {
        let teacher = Teacher::new(self.paths.teacher_path(&person), person);
        create_new(&teacher)?;
        let path = teacher.path().to_path_buf();
        self.teachers.upsert(teacher);
        Ok(path)
    }

    /// Writes a new, empty section at its conventional path.
    ///
    /// # Errors
    /// - `Duplicate` when a file already exists at that path.
    pub fn add_section(&mut self, name: &str, grade: GradeLevel) -> StoreResult<PathBuf> {
        let section = Section::new(self.paths.section_path(grade, name), name, grade);
        create_new(&section)?;
        let path = section.path().to_path_buf();
        self.sections.upsert(section);
        Ok(path)
    }

    /// Deletes a record file and drops it from its roster.
    ///
    /// Files inside a roster directory are removed without being decoded, so
    /// corrupt files can be deleted too. References to the record elsewhere
    /// are left to `prune_dangling`.
    ///
    /// # Errors
    /// - `NotFound` when the file does not exist.
    /// - `UnsupportedType` when a file outside the roster directories holds
    ///   settings or app state.
    pub fn delete(&mut self, path: &Path) -> StoreResult<()> {
        let kind = match self.roster_kind(path) {
            Some(kind) => kind,
            None => AnyRecord::construct(path)?.kind(),
        };
        fs::remove_file(path).map_err(|err| StoreError::from_read(path, err))?;
        match kind {
            RecordKind::Student => {
                self.students.take(path);
            }
            RecordKind::Teacher => {
                self.teachers.take(path);
            }
            RecordKind::Section => {
                self.sections.take(path);
            }
            RecordKind::Settings | RecordKind::AppState => {}
        }
        info!("event=record_remove module=service status=ok kind={kind}");
        Ok(())
    }

    fn roster_kind(&self, path: &Path) -> Option<RecordKind> {
        let parent = path.parent()?;
        if parent == self.paths.students {
            Some(RecordKind::Student)
        } else if parent == self.paths.teachers {
            Some(RecordKind::Teacher)
        } else if parent == self.paths.sections {
            Some(RecordKind::Section)
        } else {
            None
        }
    }

    /// Drops vanished records from memory and dangling references from the
    /// remaining ones, writing back every record that changed.
    ///
    /// Returns the total number of records and references removed.
    pub fn prune_dangling(&mut self) -> StoreResult<usize> {
        let mut removed = self.students.prune_missing()
            + self.teachers.prune_missing()
            + self.sections.prune_missing();

        removed += prune_references(&mut self.sections, Section::prune_dangling)?;
        removed += prune_references(&mut self.students, Student::prune_dangling)?;
        removed += prune_references(&mut self.teachers, Teacher::prune_dangling)?;

        if removed > 0 {
            info!("event=prune_dangling module=service status=ok removed={removed}");
        }
        Ok(removed)
    }

    /// Every loaded student, teacher and section as one list.
    pub fn all_records(&self) -> Vec<AnyRecord> {
        let students = self.students.iter().cloned().map(AnyRecord::from);
        let teachers = self.teachers.iter().cloned().map(AnyRecord::from);
        let sections = self.sections.iter().cloned().map(AnyRecord::from);
        students.chain(teachers).chain(sections).collect()
    }

    /// Searches across every loaded collection.
    pub fn search(&self, filters: &SearchFilters) -> Vec<AnyRecord> {
        let records = self.all_records();
        search(&records, filters).into_iter().cloned().collect()
    }

    /// Writes settings and app state. Call once when the shell exits.
    pub fn shutdown(self) -> StoreResult<()> {
        self.app_state.dump()?;
        self.settings.dump()?;
        info!("event=context_shutdown module=service status=ok");
        Ok(())
    }
}

fn prune_references<T: RecordFile>(
    collection: &mut Collection<T>,
    prune: impl Fn(&mut T) -> usize,
) -> StoreResult<usize> {
    let mut removed = 0;
    for record in collection.iter_mut() {
        let pruned = prune(record);
        if pruned > 0 {
            record.dump()?;
            removed += pruned;
        }
    }
    Ok(removed)
}

fn create_new<T: RecordFile>(record: &T) -> StoreResult<()> {
    if record.exists() {
        return Err(StoreError::Duplicate(record.path().to_path_buf()));
    }
    record.dump()
}

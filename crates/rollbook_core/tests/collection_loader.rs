use chrono::NaiveDate;
use rollbook_core::{
    Collection, GradeLevel, Person, Record, RecordFile, SchoolYear, Section, Sex, StoreError,
    Student,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_student(dir: &Path, first: &str) -> Student {
    let birth_date = NaiveDate::from_ymd_opt(2013, 1, 9).unwrap();
    let person = Person::new(first, birth_date, "Davao", Sex::Male).with_last_name(Some("santos"));
    let student = Student::new(
        dir.join(format!("Santos_{first}.rec")),
        person,
        format!("lrn-{first}"),
        GradeLevel::GradeII,
        SchoolYear::new("2022", "2023"),
    );
    student.dump().unwrap();
    student
}

fn sorted_paths(collection: &Collection<Student>) -> Vec<PathBuf> {
    let mut paths = collection
        .iter()
        .map(|student| student.path().to_path_buf())
        .collect::<Vec<_>>();
    paths.sort();
    paths
}

#[test]
fn load_reads_every_record_file_in_directory() {
    let dir = TempDir::new().unwrap();
    let a = write_student(dir.path(), "Aldo");
    let b = write_student(dir.path(), "Bert");

    let mut students = Collection::<Student>::new(dir.path());
    students.load().unwrap();

    assert_eq!(students.len(), 2);
    assert_eq!(
        sorted_paths(&students),
        vec![a.path().to_path_buf(), b.path().to_path_buf()]
    );
    assert_eq!(students.get(a.path()), Some(&a));
}

#[test]
fn reload_replaces_instead_of_merging() {
    let dir = TempDir::new().unwrap();
    write_student(dir.path(), "Aldo");

    let mut students = Collection::<Student>::new(dir.path());
    students.load().unwrap();
    assert_eq!(students.len(), 1);

    let added = write_student(dir.path(), "Carlo");
    students.load().unwrap();

    assert_eq!(students.len(), 2);
    assert!(students.get(added.path()).is_some());
    let paths = sorted_paths(&students);
    let mut deduped = paths.clone();
    deduped.dedup();
    assert_eq!(paths, deduped);
}

#[test]
fn load_skips_files_without_record_extension_and_subdirectories() {
    let dir = TempDir::new().unwrap();
    write_student(dir.path(), "Aldo");
    fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();
    fs::create_dir(dir.path().join("nested.rec")).unwrap();

    let mut students = Collection::<Student>::new(dir.path());
    students.load().unwrap();
    assert_eq!(students.len(), 1);
}

#[test]
fn corrupt_file_aborts_load_and_keeps_previous_list() {
    let dir = TempDir::new().unwrap();
    let aldo = write_student(dir.path(), "Aldo");

    let mut students = Collection::<Student>::new(dir.path());
    students.load().unwrap();

    fs::write(dir.path().join("Broken.rec"), b"{ truncated").unwrap();
    let err = students.load().unwrap_err();

    assert!(matches!(err, StoreError::CorruptData { path, .. } if path.ends_with("Broken.rec")));
    assert_eq!(students.len(), 1);
    assert!(students.get(aldo.path()).is_some());
}

#[test]
fn foreign_record_kind_in_directory_aborts_load() {
    let dir = TempDir::new().unwrap();
    write_student(dir.path(), "Aldo");
    Section::new(dir.path().join("GradeI_Rizal.rec"), "Rizal", GradeLevel::GradeI)
        .dump()
        .unwrap();

    let mut students = Collection::<Student>::new(dir.path());
    let err = students.load().unwrap_err();
    assert!(matches!(err, StoreError::UnsupportedType { .. }));
    assert!(students.is_empty());
}

#[test]
fn missing_directory_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut students = Collection::<Student>::new(dir.path().join("students"));

    let err = students.load().unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn prune_missing_drops_records_whose_file_vanished() {
    let dir = TempDir::new().unwrap();
    let aldo = write_student(dir.path(), "Aldo");
    write_student(dir.path(), "Bert");

    let mut students = Collection::<Student>::new(dir.path());
    students.load().unwrap();
    aldo.remove().unwrap();

    assert_eq!(students.prune_missing(), 1);
    assert_eq!(students.len(), 1);
    assert!(students.get(aldo.path()).is_none());
}

#[test]
fn upsert_and_take_only_touch_memory() {
    let dir = TempDir::new().unwrap();
    let mut aldo = write_student(dir.path(), "Aldo");

    let mut students = Collection::<Student>::new(dir.path());
    students.load().unwrap();

    aldo.lrn = "updated".to_string();
    students.upsert(aldo.clone());
    assert_eq!(students.len(), 1);
    assert_eq!(students.get(aldo.path()).unwrap().lrn, "updated");

    let taken = students.take(aldo.path()).unwrap();
    assert_eq!(taken.lrn, "updated");
    assert!(students.is_empty());
    assert!(aldo.exists());
}

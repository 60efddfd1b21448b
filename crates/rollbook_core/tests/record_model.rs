use chrono::NaiveDate;
use rollbook_core::{
    AnyRecord, GradeLevel, Person, Record, SchoolYear, Section, Sex, Student, Teacher,
    ValidationError,
};
use std::path::Path;

fn person() -> Person {
    let birth_date = NaiveDate::from_ymd_opt(2010, 12, 30).unwrap();
    Person::new("  jOSE  ", birth_date, "Calamba, Laguna", Sex::Male)
        .with_middle_name(Some("protacio"))
        .with_last_name(Some("RIZAL"))
}

#[test]
fn person_names_are_title_cased_on_construction() {
    let person = person();
    assert_eq!(person.first_name(), "Jose");
    assert_eq!(person.middle_name(), Some("Protacio"));
    assert_eq!(person.last_name(), Some("Rizal"));
    assert_eq!(person.display_name(), "Jose Protacio Rizal");
}

#[test]
fn middle_name_clears_only_explicitly() {
    let mut person = person();
    person.set_middle_name(None);
    assert_eq!(person.middle_name(), Some("Protacio"));

    person.clear_middle_name();
    assert_eq!(person.middle_name(), None);
    assert_eq!(person.display_name(), "Jose Rizal");
}

#[test]
fn student_serialization_flattens_person_fields_and_skips_path() {
    let mut student = Student::new(
        "students/Rizal_Jose_Protacio.rec",
        person(),
        "136512100003",
        GradeLevel::KinderII,
        SchoolYear::new("2021", "2022"),
    );
    student.guardians = vec!["Francisco Mercado".to_string()];

    let json = serde_json::to_value(&student).unwrap();
    assert_eq!(json["first_name"], "Jose");
    assert_eq!(json["birth_date"], "2010-12-30");
    assert_eq!(json["sex"], "male");
    assert_eq!(json["grade"], "Kinder II");
    assert_eq!(json["school_year"]["start"], "2021");
    assert_eq!(json["guardians"][0], "Francisco Mercado");
    assert!(json["section"].is_null());
    assert!(json.get("path").is_none());
    assert!(json.get("person").is_none());
}

#[test]
fn teacher_tracks_taught_sections_by_path() {
    let mut teacher = Teacher::new("teachers/Rizal_Jose.rec", person());
    assert!(teacher.add_taught_section("Mabini", "sections/GradeV_Mabini.rec"));
    assert!(!teacher.add_taught_section("Renamed", "sections/GradeV_Mabini.rec"));
    assert_eq!(teacher.taught_sections().len(), 1);
    assert!(teacher.teaches(Path::new("sections/GradeV_Mabini.rec")));

    assert!(teacher.remove_taught_section(Path::new("sections/GradeV_Mabini.rec")));
    assert!(!teacher.remove_taught_section(Path::new("sections/GradeV_Mabini.rec")));
}

#[test]
fn validation_rejects_empty_path_and_blank_names() {
    let student = Student::new(
        "",
        person(),
        "lrn",
        GradeLevel::GradeI,
        SchoolYear::new("2021", "2022"),
    );
    assert_eq!(student.validate(), Err(ValidationError::EmptyPath));

    let section = Section::new("sections/x.rec", " ", GradeLevel::GradeI);
    assert_eq!(section.validate(), Err(ValidationError::BlankSectionName));
}

#[test]
fn records_are_identified_by_path() {
    let a = AnyRecord::from(Teacher::new("teachers/a.rec", person()));
    let mut renamed = person();
    renamed.set_first_name(Some("andres"));
    let b = AnyRecord::from(Teacher::new("teachers/a.rec", renamed));
    let c = AnyRecord::from(Teacher::new("teachers/c.rec", person()));

    assert!(a.same_record(&b));
    assert!(!a.same_record(&c));
}

//! File naming for new records.
//!
//! # Invariants
//! - Person files: `<last>_<first>_<middle>.rec`, missing parts omitted.
//! - Section files: `<grade>_<name>.rec`.
//! - Whitespace and path separators are stripped from every part.

use crate::model::grade::GradeLevel;
use crate::model::person::Person;
use crate::store::RECORD_EXTENSION;
use once_cell::sync::Lazy;
use regex::Regex;

static STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s/\\]+").expect("valid strip regex"));

pub fn person_file_name(person: &Person) -> String {
    let parts = [
        person.last_name(),
        Some(person.first_name()),
        person.middle_name(),
    ];
    file_name(parts.into_iter().flatten())
}

pub fn section_file_name(grade: GradeLevel, name: &str) -> String {
    file_name([grade.label(), name])
}

fn file_name<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let stem = parts
        .into_iter()
        .map(|part| STRIP_RE.replace_all(part, "").into_owned())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    format!("{stem}.{RECORD_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::{person_file_name, section_file_name};
    use crate::model::grade::GradeLevel;
    use crate::model::person::{Person, Sex};
    use chrono::NaiveDate;

    fn person() -> Person {
        let birth_date = NaiveDate::from_ymd_opt(2011, 6, 1).expect("valid date");
        Person::new("juan carlos", birth_date, "Cebu", Sex::Male)
    }

    #[test]
    fn person_file_name_strips_spaces_and_skips_missing_parts() {
        assert_eq!(person_file_name(&person()), "JuanCarlos.rec");

        let full = person()
            .with_last_name(Some("dela cruz"))
            .with_middle_name(Some("santos"));
        assert_eq!(person_file_name(&full), "DelaCruz_JuanCarlos_Santos.rec");
    }

    #[test]
    fn section_file_name_uses_grade_label_and_strips_separators() {
        assert_eq!(
            section_file_name(GradeLevel::KinderII, "Sampaguita / A"),
            "KinderII_SampaguitaA.rec"
        );
    }
}

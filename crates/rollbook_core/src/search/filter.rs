//! Linear attribute-filter search over in-memory records.
//!
//! # Responsibility
//! - Project records into flat field maps. Persons expose one `name` built
//!   from their name parts; sections keep their stored `name`.
//! - Keep records whose fields satisfy every filter entry.
//!
//! # Invariants
//! - Filters combine with logical AND; an empty filter set matches everything.
//! - String candidates match string filters by case-sensitive substring;
//!   every other pair must be exactly equal.
//! - A record missing a filtered field never matches.
//! - Results keep input order.

use crate::model::record::{AnyRecord, Record};
use crate::model::section::Section;
use crate::model::student::Student;
use crate::model::teacher::Teacher;
use serde_json::{Map, Value};

/// Flat field-name to value projection of one record.
pub type SearchFields = Map<String, Value>;

const NAME_PARTS: [&str; 3] = ["first_name", "middle_name", "last_name"];

/// Anything that can be projected into searchable fields.
pub trait Searchable {
    fn search_fields(&self) -> SearchFields;
}

/// Ordered set of `field = value` filter entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    entries: Vec<(String, Value)>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) one filter entry.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns whether `fields` satisfies every entry.
    pub fn matches(&self, fields: &SearchFields) -> bool {
        self.iter().all(|(name, expected)| {
            fields
                .get(name)
                .is_some_and(|candidate| value_matches(candidate, expected))
        })
    }
}

impl From<Map<String, Value>> for SearchFilters {
    fn from(value: Map<String, Value>) -> Self {
        Self {
            entries: value.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SearchFilters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (field, value) in iter {
            filters.insert(field, value);
        }
        filters
    }
}

/// Returns the records matching every filter, in input order.
pub fn search<'a, T: Searchable>(records: &'a [T], filters: &SearchFilters) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| filters.matches(&record.search_fields()))
        .collect()
}

fn value_matches(candidate: &Value, expected: &Value) -> bool {
    match (candidate, expected) {
        (Value::String(candidate), Value::String(expected)) => {
            candidate.contains(expected.as_str())
        }
        _ => candidate == expected,
    }
}

/// Serialized body plus `path` and `kind`.
fn project<T: Record>(record: &T) -> SearchFields {
    let mut fields = match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    };
    fields.insert(
        "path".to_string(),
        Value::String(record.path().to_string_lossy().into_owned()),
    );
    fields.insert("kind".to_string(), Value::String(T::KIND.to_string()));
    fields
}

/// [`project`] with the person's name parts folded into one `name`.
fn project_person<T: Record>(record: &T, name: String) -> SearchFields {
    let mut fields = project(record);
    for part in NAME_PARTS {
        fields.remove(part);
    }
    fields.insert("name".to_string(), Value::String(name));
    fields
}

impl Searchable for Student {
    fn search_fields(&self) -> SearchFields {
        project_person(self, self.person.display_name())
    }
}

impl Searchable for Teacher {
    fn search_fields(&self) -> SearchFields {
        project_person(self, self.person.display_name())
    }
}

impl Searchable for Section {
    fn search_fields(&self) -> SearchFields {
        project(self)
    }
}

impl Searchable for AnyRecord {
    fn search_fields(&self) -> SearchFields {
        match self {
            Self::Student(student) => student.search_fields(),
            Self::Teacher(teacher) => teacher.search_fields(),
            Self::Section(section) => section.search_fields(),
        }
    }
}

impl Searchable for SearchFields {
    fn search_fields(&self) -> SearchFields {
        self.clone()
    }
}

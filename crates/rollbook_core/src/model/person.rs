//! Shared personal fields for students and teachers.
//!
//! # Responsibility
//! - Hold the fields common to every person record, embedded by value.
//! - Normalize human names on assignment.
//!
//! # Invariants
//! - Stored names are title-cased.
//! - Assigning `None` or a blank string to a name leaves it unchanged.
//! - `first_name` is never blank for a valid person.

use crate::model::record::{ParseFieldError, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl Display for Sex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(ParseFieldError {
                field: "sex",
                value: s.to_string(),
            }),
        }
    }
}

/// Personal details shared by [`crate::Student`] and [`crate::Teacher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    first_name: String,
    middle_name: Option<String>,
    last_name: Option<String>,
    pub birth_date: NaiveDate,
    pub address: String,
    pub sex: Sex,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    /// Path of a picture file. The image itself is never serialized.
    pub picture: Option<String>,
}

impl Person {
    /// Creates a person with a title-cased first name and no optional fields.
    pub fn new(
        first_name: &str,
        birth_date: NaiveDate,
        address: impl Into<String>,
        sex: Sex,
    ) -> Self {
        Self {
            first_name: title_case(first_name.trim()),
            middle_name: None,
            last_name: None,
            birth_date,
            address: address.into(),
            sex,
            contact_number: None,
            email: None,
            picture: None,
        }
    }

    pub fn with_middle_name(mut self, value: Option<&str>) -> Self {
        self.set_middle_name(value);
        self
    }

    pub fn with_last_name(mut self, value: Option<&str>) -> Self {
        self.set_last_name(value);
        self
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn set_first_name(&mut self, value: Option<&str>) {
        if let Some(name) = normalize_name(value) {
            self.first_name = name;
        }
    }

    pub fn set_middle_name(&mut self, value: Option<&str>) {
        if let Some(name) = normalize_name(value) {
            self.middle_name = Some(name);
        }
    }

    pub fn set_last_name(&mut self, value: Option<&str>) {
        if let Some(name) = normalize_name(value) {
            self.last_name = Some(name);
        }
    }

    /// Explicitly drops the middle name; plain assignment cannot clear it.
    pub fn clear_middle_name(&mut self) {
        self.middle_name = None;
    }

    /// `first middle last`, with gaps from missing parts collapsed.
    pub fn display_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            self.last_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::BlankFirstName);
        }
        Ok(())
    }
}

fn normalize_name(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(title_case(trimmed))
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub(crate) fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            output.push(ch);
            previous_is_letter = false;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{title_case, Person, Sex};
    use chrono::NaiveDate;

    fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2012, 3, 14).expect("valid date")
    }

    #[test]
    fn title_case_handles_runs_and_punctuation() {
        assert_eq!(title_case("maria clara"), "Maria Clara");
        assert_eq!(title_case("dE LA cRUZ"), "De La Cruz");
        assert_eq!(title_case("o'neil-smith"), "O'Neil-Smith");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn name_setters_ignore_absent_and_blank_values() {
        let mut person = Person::new("ana", birth_date(), "Manila", Sex::Female)
            .with_last_name(Some("cruz"));

        person.set_last_name(None);
        person.set_first_name(Some("   "));
        assert_eq!(person.first_name(), "Ana");
        assert_eq!(person.last_name(), Some("Cruz"));

        person.set_middle_name(Some("santos"));
        assert_eq!(person.middle_name(), Some("Santos"));
    }

    #[test]
    fn display_name_collapses_missing_middle_name() {
        let person = Person::new("ana", birth_date(), "Manila", Sex::Female)
            .with_last_name(Some("cruz"));
        assert_eq!(person.display_name(), "Ana Cruz");

        let full = person.with_middle_name(Some("maria"));
        assert_eq!(full.display_name(), "Ana Maria Cruz");
    }

    #[test]
    fn sex_parses_case_insensitively() {
        assert_eq!("Female".parse::<Sex>().expect("female parses"), Sex::Female);
        assert_eq!(" MALE ".parse::<Sex>().expect("male parses"), Sex::Male);
        assert!("other".parse::<Sex>().is_err());
    }
}

//! Grade levels and school years.

use crate::model::record::ParseFieldError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed, ordered list of grade levels a student or section can be in.
///
/// Serialized with its display label so persisted files and search filters
/// use the same text the forms show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "Preparatory")]
    Preparatory,
    #[serde(rename = "Kinder I")]
    KinderI,
    #[serde(rename = "Kinder II")]
    KinderII,
    #[serde(rename = "Grade I")]
    GradeI,
    #[serde(rename = "Grade II")]
    GradeII,
    #[serde(rename = "Grade III")]
    GradeIII,
    #[serde(rename = "Grade IV")]
    GradeIV,
    #[serde(rename = "Grade V")]
    GradeV,
    #[serde(rename = "Grade VI")]
    GradeVI,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 9] = [
        Self::Preparatory,
        Self::KinderI,
        Self::KinderII,
        Self::GradeI,
        Self::GradeII,
        Self::GradeIII,
        Self::GradeIV,
        Self::GradeV,
        Self::GradeVI,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Preparatory => "Preparatory",
            Self::KinderI => "Kinder I",
            Self::KinderII => "Kinder II",
            Self::GradeI => "Grade I",
            Self::GradeII => "Grade II",
            Self::GradeIII => "Grade III",
            Self::GradeIV => "Grade IV",
            Self::GradeV => "Grade V",
            Self::GradeVI => "Grade VI",
        }
    }
}

impl Display for GradeLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GradeLevel {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|grade| grade.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ParseFieldError {
                field: "grade level",
                value: s.to_string(),
            })
    }
}

/// School year as a pair of year tokens, e.g. `2021`–`2022`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchoolYear {
    pub start: String,
    pub end: String,
}

impl SchoolYear {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Display for SchoolYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::{GradeLevel, SchoolYear};

    #[test]
    fn grade_levels_are_ordered() {
        assert!(GradeLevel::Preparatory < GradeLevel::KinderI);
        assert!(GradeLevel::KinderII < GradeLevel::GradeI);
        assert!(GradeLevel::GradeV < GradeLevel::GradeVI);
        assert_eq!(GradeLevel::ALL.first(), Some(&GradeLevel::Preparatory));
    }

    #[test]
    fn grade_level_parses_labels_loosely() {
        assert_eq!(
            "kinder  ii".parse::<GradeLevel>().expect("label parses"),
            GradeLevel::KinderII
        );
        assert_eq!(
            "Grade IV".parse::<GradeLevel>().expect("label parses"),
            GradeLevel::GradeIV
        );
        assert!("Grade VII".parse::<GradeLevel>().is_err());
    }

    #[test]
    fn school_year_displays_as_range() {
        assert_eq!(SchoolYear::new("2021", "2022").to_string(), "2021-2022");
    }
}

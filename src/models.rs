use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// One row of the schedule source: a single weekly meeting of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub period_id: PeriodId,
    pub period_name: String,
    pub sub_term: String,
    pub course_name: String,
    pub instructor: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
}

impl Session {
    pub fn display(&self) -> SessionDisplay {
        SessionDisplay {
            course_name: self.course_name.clone(),
            instructor: self.instructor.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            room: self.room.clone(),
        }
    }
}

/// Opaque academic period identifier.
///
/// Ids that are both integers compare numerically, everything else compares
/// as text. Integer ids sort below textual ones so the order stays total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PeriodId(pub String);

impl PeriodId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl Ord for PeriodId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for PeriodId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeriodId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub id: PeriodId,
    pub name: String,
}

/// Sessions sharing a course name and instructor inside one filtered scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub name: String,
    pub instructor: String,
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionDisplay {
    pub course_name: String,
    pub instructor: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
}

/// The five teaching days shown in the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Weekday {
    #[serde(rename = "Lunes")]
    Monday,
    #[serde(rename = "Martes")]
    Tuesday,
    #[serde(rename = "Miércoles")]
    Wednesday,
    #[serde(rename = "Jueves")]
    Thursday,
    #[serde(rename = "Viernes")]
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Label used in the source `dia` column.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Lunes",
            Weekday::Tuesday => "Martes",
            Weekday::Wednesday => "Miércoles",
            Weekday::Thursday => "Jueves",
            Weekday::Friday => "Viernes",
        }
    }

    /// Exact match against the source label; anything else (weekends,
    /// unaccented spellings) is not a grid day.
    pub fn from_label(label: &str) -> Option<Weekday> {
        Self::ALL.into_iter().find(|day| day.label() == label)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

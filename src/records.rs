//! Core domain types for per-section grade records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Academic semester. Variant order gives the within-year sort:
/// SPRING < SUMMER < FALL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Semester {
    Spring,
    Summer,
    Fall,
}

impl Semester {
    /// Parses an upstream semester string, case-insensitively.
    ///
    /// Unknown values degrade to [`Semester::Fall`] rather than dropping the
    /// row; the normalizer never discards records over a single bad field.
    pub fn parse(s: &str) -> Semester {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPRING" => Semester::Spring,
            "SUMMER" => Semester::Summer,
            _ => Semester::Fall,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Semester::Spring => "SPRING",
            Semester::Summer => "SUMMER",
            Semester::Fall => "FALL",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A `(year, semester)` pair. Ordering is chronological: year first, then
/// semester within the year.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Term {
    pub year: i32,
    pub semester: Semester,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.year, self.semester)
    }
}

/// Student counts for the seven letter grades tracked upstream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct GradeCounts {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
    pub f: u32,
    pub i: u32,
    pub q: u32,
}

impl GradeCounts {
    /// Fixed display order for the seven letters.
    pub const LETTERS: [&'static str; 7] = ["A", "B", "C", "D", "F", "I", "Q"];

    pub fn total(&self) -> u32 {
        self.a + self.b + self.c + self.d + self.f + self.i + self.q
    }

    pub fn add(&mut self, other: &GradeCounts) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
        self.d += other.d;
        self.f += other.f;
        self.i += other.i;
        self.q += other.q;
    }

    /// Counts in [`Self::LETTERS`] order.
    pub fn as_array(&self) -> [u32; 7] {
        [self.a, self.b, self.c, self.d, self.f, self.i, self.q]
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}

/// One course section in one term, taught by one professor.
///
/// `total_students` is always the sum of the seven grade counts; storing the
/// counts as a [`GradeCounts`] and deriving the total keeps that invariant by
/// construction. Records are immutable after normalization; the whole set is
/// replaced on each fresh fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassRecord {
    pub year: i32,
    pub semester: Semester,
    /// Empty string when upstream omitted the professor.
    pub professor: String,
    /// `None` when upstream omitted the GPA or sent a non-numeric value.
    pub gpa: Option<f64>,
    pub section: String,
    pub counts: GradeCounts,
}

impl ClassRecord {
    pub fn total_students(&self) -> u32 {
        self.counts.total()
    }

    pub fn term(&self) -> Term {
        Term {
            year: self.year,
            semester: self.semester,
        }
    }

    /// The `"<year> <SEMESTER>"` label used on chart axes.
    pub fn term_label(&self) -> String {
        self.term().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_students_is_sum_of_counts() {
        let record = ClassRecord {
            year: 2022,
            semester: Semester::Fall,
            professor: "Smith".to_string(),
            gpa: Some(3.5),
            section: "501".to_string(),
            counts: GradeCounts {
                a: 10,
                b: 5,
                c: 3,
                d: 2,
                f: 1,
                i: 1,
                q: 2,
            },
        };

        assert_eq!(record.total_students(), 24);
        assert_eq!(record.counts.as_array().iter().sum::<u32>(), 24);
    }

    #[test]
    fn test_semester_ordering_within_year() {
        assert!(Semester::Spring < Semester::Summer);
        assert!(Semester::Summer < Semester::Fall);
    }

    #[test]
    fn test_term_ordering_is_chronological() {
        let fall_2022 = Term {
            year: 2022,
            semester: Semester::Fall,
        };
        let spring_2023 = Term {
            year: 2023,
            semester: Semester::Spring,
        };

        assert!(fall_2022 < spring_2023);
    }

    #[test]
    fn test_semester_parse_is_case_insensitive() {
        assert_eq!(Semester::parse("spring"), Semester::Spring);
        assert_eq!(Semester::parse("SUMMER"), Semester::Summer);
        assert_eq!(Semester::parse("Fall"), Semester::Fall);
    }

    #[test]
    fn test_semester_parse_unknown_degrades_to_fall() {
        assert_eq!(Semester::parse("WINTER"), Semester::Fall);
        assert_eq!(Semester::parse(""), Semester::Fall);
    }

    #[test]
    fn test_term_label_format() {
        let term = Term {
            year: 2022,
            semester: Semester::Fall,
        };
        assert_eq!(term.to_string(), "2022 FALL");
    }
}

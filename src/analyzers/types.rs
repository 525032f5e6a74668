//! Derived-output types shared by the aggregation stages.

use serde::Serialize;
use std::fmt;

use crate::records::{ClassRecord, GradeCounts, Semester, Term};

/// Chart color palette. Professors get colors by rank order, wrapping when
/// a course has seen more professors than the palette has entries.
pub const COLOR_PALETTE: [&str; 20] = [
    "#FF5733", "#33FF57", "#3357FF", "#FF33A1", "#FFC300", "#00E0FF", "#A633FF",
    "#33FFA1", "#FF7733", "#00FF99", "#FF3383", "#33D4FF", "#FF4500", "#2E8B57",
    "#4682B4", "#C71585", "#FFD700", "#40E0D0", "#800080", "#00FA9A",
];

/// One professor's enrollment-weighted average GPA over the active record
/// set, plus the display color assigned from rank order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfessorSummary {
    pub professor: String,
    pub avg_gpa: f64,
    pub color: &'static str,
}

/// One chronological row of the GPA line-chart matrix. `values` is aligned
/// with [`GpaSeries::professors`]; `None` means the professor has no
/// defined-GPA record that term and renders as a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaSeriesRow {
    pub term: Term,
    pub values: Vec<Option<f64>>,
}

/// GPA-over-time matrix: one column per professor, one row per term,
/// chronologically sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GpaSeries {
    pub professors: Vec<String>,
    pub rows: Vec<GpaSeriesRow>,
}

/// One year's grade counts normalized to fractions of that year's total.
/// All zeros when the year had no students.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearShares {
    pub year: i32,
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "D")]
    pub d: f64,
    #[serde(rename = "F")]
    pub f: f64,
    #[serde(rename = "I")]
    pub i: f64,
    #[serde(rename = "Q")]
    pub q: f64,
}

impl YearShares {
    pub fn zeroed(year: i32) -> Self {
        YearShares {
            year,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            f: 0.0,
            i: 0.0,
            q: 0.0,
        }
    }

    /// Normalizes raw counts into shares; a zero total yields all zeros.
    pub fn from_counts(year: i32, counts: &GradeCounts) -> Self {
        let total = counts.total();
        if total == 0 {
            return YearShares::zeroed(year);
        }
        let total = total as f64;
        YearShares {
            year,
            a: counts.a as f64 / total,
            b: counts.b as f64 / total,
            c: counts.c as f64 / total,
            d: counts.d as f64 / total,
            f: counts.f as f64 / total,
            i: counts.i as f64 / total,
            q: counts.q as f64 / total,
        }
    }

    /// Shares in [`GradeCounts::LETTERS`] order.
    pub fn as_array(&self) -> [f64; 7] {
        [self.a, self.b, self.c, self.d, self.f, self.i, self.q]
    }

    pub fn is_zero(&self) -> bool {
        self.as_array().iter().all(|&s| s == 0.0)
    }
}

/// Key for one collapsible-table group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupKey {
    pub year: i32,
    pub semester: Semester,
    pub professor: String,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.year, self.semester, self.professor)
    }
}

/// One renderable table group: its section rows, the group's weighted GPA,
/// and the letter totals the percentage columns derive from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableGroup {
    pub key: GroupKey,
    pub avg_gpa: f64,
    pub counts: GradeCounts,
    pub rows: Vec<ClassRecord>,
}

impl TableGroup {
    /// One letter's percentage of the group total. Zero-total groups are
    /// already suppressed before rendering; the guard is defensive so a NaN
    /// can never reach output.
    pub fn percent(&self, letter_count: u32) -> f64 {
        let total = self.counts.total();
        if total == 0 {
            0.0
        } else {
            letter_count as f64 / total as f64 * 100.0
        }
    }
}

//! End-to-end recompute of all derived dashboard state.
//!
//! The dependency graph is one explicit pure function of the three inputs
//! (raw records, time range, selection): call it again whenever any input
//! changes. That keeps the whole pipeline testable without any UI in the
//! loop.

use serde::Serialize;

use crate::analyzers::filter::{self, TimeRange};
use crate::analyzers::types::{GpaSeries, ProfessorSummary, TableGroup, YearShares};
use crate::analyzers::{rank, series, table};
use crate::records::{ClassRecord, GradeCounts};

/// Everything the presentation layer consumes, re-derived as a whole on any
/// input change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DerivedState {
    /// Ranked over the time-filtered (not selection-filtered) set; this is
    /// the selection list, so unselected professors keep their rank color.
    pub professors: Vec<ProfessorSummary>,
    /// Ranked over the selection-filtered set.
    pub best_professor: Option<ProfessorSummary>,
    pub gpa_series: GpaSeries,
    pub grade_distribution: GradeCounts,
    pub stacked_by_year: Vec<YearShares>,
    pub stacked_by_professor: Vec<(String, Vec<YearShares>)>,
    pub table: Vec<TableGroup>,
}

impl DerivedState {
    /// The per-professor stacked series worth rendering: professors whose
    /// entire history is all-zero are skipped in the display variant only.
    pub fn renderable_professor_shares(&self) -> Vec<&(String, Vec<YearShares>)> {
        self.stacked_by_professor
            .iter()
            .filter(|(_, rows)| series::has_any_shares(rows))
            .collect()
    }
}

/// Runs the full pipeline: time filter, ranking, selection filter, the four
/// series builders, and the table grouper.
pub fn recompute(
    records: &[ClassRecord],
    range: TimeRange,
    selection: &[String],
    current_year: i32,
) -> DerivedState {
    if records.is_empty() {
        return DerivedState::default();
    }

    let windowed = range.filter(records, current_year);
    let professors = rank::rank(&windowed);
    let selected = filter::select_professors(&windowed, selection);

    // Ranked order restricted to the selection fixes chart column order.
    let selected_professors: Vec<String> = professors
        .iter()
        .filter(|p| selection.contains(&p.professor))
        .map(|p| p.professor.clone())
        .collect();

    DerivedState {
        best_professor: rank::best(&selected),
        gpa_series: series::gpa_over_terms(&selected, &selected_professors),
        grade_distribution: series::grade_totals(&selected),
        stacked_by_year: series::stacked_by_year(&selected),
        stacked_by_professor: series::stacked_by_professor(&selected, &selected_professors),
        table: table::group(&selected, &selected_professors),
        professors,
    }
}

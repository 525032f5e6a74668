//! Externally-owned session state feeding the aggregation pipeline.
//!
//! The session owns the three pipeline inputs (raw records, time range,
//! professor selection) plus the current derived state, and re-derives on
//! every change. A monotonically increasing request generation guards
//! against a slow stale response resurrecting cleared data.

use tracing::debug;

use crate::analyzers::filter::TimeRange;
use crate::analyzers::rank;
use crate::pipeline::{self, DerivedState};
use crate::records::ClassRecord;

#[derive(Debug)]
pub struct Session {
    records: Vec<ClassRecord>,
    range: TimeRange,
    selection: Vec<String>,
    generation: u64,
    derived: DerivedState,
    current_year: i32,
}

impl Session {
    pub fn new(current_year: i32) -> Self {
        Session {
            records: Vec::new(),
            range: TimeRange::All,
            selection: Vec::new(),
            generation: 0,
            derived: DerivedState::default(),
            current_year,
        }
    }

    pub fn records(&self) -> &[ClassRecord] {
        &self.records
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    /// Starts a new query: clears records, selection, and derived state,
    /// resets the range, and issues a fresh generation token. The matching
    /// response must present this token to be applied.
    pub fn begin_query(&mut self) -> u64 {
        self.records.clear();
        self.selection.clear();
        self.range = TimeRange::All;
        self.derived = DerivedState::default();
        self.generation += 1;
        self.generation
    }

    /// Applies a fetch response. Returns `false` (and changes nothing) when
    /// the token is stale, i.e. a newer query has been issued since.
    ///
    /// On a fresh response the selection is initialized to every ranked
    /// professor; later range changes never re-trigger that initialization.
    pub fn apply_response(&mut self, generation: u64, records: Vec<ClassRecord>) -> bool {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "discarding stale fetch response"
            );
            return false;
        }
        self.records = records;
        self.selection = rank::rank(&self.records)
            .into_iter()
            .map(|p| p.professor)
            .collect();
        self.refresh();
        true
    }

    pub fn set_range(&mut self, range: TimeRange) {
        self.range = range;
        self.refresh();
    }

    /// Replaces the selection wholesale (e.g. from a CLI professor list).
    pub fn set_selection(&mut self, selection: Vec<String>) {
        self.selection = selection;
        self.refresh();
    }

    /// Adds the professor to the selection if absent, removes them if
    /// present.
    pub fn toggle_professor(&mut self, professor: &str) {
        if let Some(pos) = self.selection.iter().position(|p| p == professor) {
            self.selection.remove(pos);
        } else {
            self.selection.push(professor.to_string());
        }
        self.refresh();
    }

    /// Selects every professor currently listed in the derived ranking.
    pub fn select_all(&mut self) {
        self.selection = self
            .derived
            .professors
            .iter()
            .map(|p| p.professor.clone())
            .collect();
        self.refresh();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.refresh();
    }

    /// Returns to the pristine state without invalidating in-flight
    /// requests (the generation is untouched; `begin_query` handles that).
    pub fn reset(&mut self) {
        self.records.clear();
        self.selection.clear();
        self.range = TimeRange::All;
        self.derived = DerivedState::default();
    }

    fn refresh(&mut self) {
        self.derived =
            pipeline::recompute(&self.records, self.range, &self.selection, self.current_year);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{GradeCounts, Semester};

    fn record(year: i32, professor: &str, gpa: f64) -> ClassRecord {
        ClassRecord {
            year,
            semester: Semester::Fall,
            professor: professor.to_string(),
            gpa: Some(gpa),
            section: "-".to_string(),
            counts: GradeCounts {
                a: 10,
                ..GradeCounts::default()
            },
        }
    }

    #[test]
    fn test_response_initializes_selection_to_all_professors() {
        let mut session = Session::new(2026);
        let generation = session.begin_query();

        assert!(session.apply_response(
            generation,
            vec![record(2022, "Smith", 3.5), record(2022, "Jones", 3.0)]
        ));

        assert_eq!(session.selection().len(), 2);
        assert!(session.derived().best_professor.is_some());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = Session::new(2026);
        let first = session.begin_query();
        let second = session.begin_query();

        // The older request resolves after the newer one was issued.
        assert!(!session.apply_response(first, vec![record(2022, "Stale", 2.0)]));
        assert!(session.records().is_empty());

        assert!(session.apply_response(second, vec![record(2022, "Fresh", 3.0)]));
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.selection(), ["Fresh".to_string()]);
    }

    #[test]
    fn test_begin_query_clears_derived_state() {
        let mut session = Session::new(2026);
        let generation = session.begin_query();
        session.apply_response(generation, vec![record(2022, "Smith", 3.5)]);
        assert!(!session.derived().table.is_empty());

        session.begin_query();
        assert!(session.derived().table.is_empty());
        assert!(session.selection().is_empty());
        assert_eq!(session.range(), TimeRange::All);
    }

    #[test]
    fn test_range_change_does_not_reinitialize_selection() {
        let mut session = Session::new(2026);
        let generation = session.begin_query();
        session.apply_response(
            generation,
            vec![record(2022, "Smith", 3.5), record(2022, "Jones", 3.0)],
        );

        session.clear_selection();
        assert!(session.selection().is_empty());

        // A later filter change must not resurrect the default selection.
        session.set_range(TimeRange::LastYears(5));
        assert!(session.selection().is_empty());
        assert!(session.derived().best_professor.is_none());
    }

    #[test]
    fn test_toggle_professor_round_trip() {
        let mut session = Session::new(2026);
        let generation = session.begin_query();
        session.apply_response(generation, vec![record(2022, "Smith", 3.5)]);

        session.toggle_professor("Smith");
        assert!(session.selection().is_empty());
        assert!(session.derived().table.is_empty());

        session.toggle_professor("Smith");
        assert_eq!(session.selection().len(), 1);
        assert_eq!(session.derived().table.len(), 1);
    }

    #[test]
    fn test_select_all_restores_ranked_professors() {
        let mut session = Session::new(2026);
        let generation = session.begin_query();
        session.apply_response(
            generation,
            vec![record(2022, "Smith", 3.5), record(2022, "Jones", 3.0)],
        );

        session.clear_selection();
        session.select_all();
        assert_eq!(session.selection().len(), 2);
    }

    #[test]
    fn test_reset_keeps_generation() {
        let mut session = Session::new(2026);
        let generation = session.begin_query();
        session.apply_response(generation, vec![record(2022, "Smith", 3.5)]);

        session.reset();
        assert!(session.records().is_empty());
        assert_eq!(session.generation(), generation);
    }
}

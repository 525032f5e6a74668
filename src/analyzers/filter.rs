//! Time-range and professor-selection filters applied ahead of every
//! range-sensitive derivation. Both are pure; the raw record set is never
//! mutated by a filter change.

use std::fmt;
use std::str::FromStr;

use crate::records::ClassRecord;

/// Trailing-year window over the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    /// Identity transform: keep everything.
    #[default]
    All,
    /// Keep records with `year >= current_year - n`.
    LastYears(u16),
}

impl TimeRange {
    pub fn filter(&self, records: &[ClassRecord], current_year: i32) -> Vec<ClassRecord> {
        match self {
            TimeRange::All => records.to_vec(),
            TimeRange::LastYears(n) => {
                let cutoff = current_year - i32::from(*n);
                records.iter().filter(|r| r.year >= cutoff).cloned().collect()
            }
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TimeRange::All),
            "2" => Ok(TimeRange::LastYears(2)),
            "3" => Ok(TimeRange::LastYears(3)),
            "5" => Ok(TimeRange::LastYears(5)),
            other => Err(format!(
                "invalid time range '{other}', expected one of: all, 2, 3, 5"
            )),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRange::All => f.write_str("all"),
            TimeRange::LastYears(n) => write!(f, "{n}"),
        }
    }
}

/// Keeps only records taught by a professor in the current selection.
/// An empty selection yields an empty result.
pub fn select_professors(records: &[ClassRecord], selection: &[String]) -> Vec<ClassRecord> {
    records
        .iter()
        .filter(|r| selection.iter().any(|p| p == &r.professor))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{GradeCounts, Semester};

    fn record(year: i32, professor: &str) -> ClassRecord {
        ClassRecord {
            year,
            semester: Semester::Fall,
            professor: professor.to_string(),
            gpa: Some(3.0),
            section: "-".to_string(),
            counts: GradeCounts {
                a: 1,
                ..GradeCounts::default()
            },
        }
    }

    #[test]
    fn test_all_range_is_identity() {
        let records = vec![record(1990, "A"), record(2024, "B")];
        let filtered = TimeRange::All.filter(&records, 2026);
        assert_eq!(filtered, records);
    }

    #[test]
    fn test_last_years_window_keeps_recent() {
        let records = vec![record(2020, "A"), record(2023, "B"), record(2026, "C")];
        let filtered = TimeRange::LastYears(3).filter(&records, 2026);

        let years: Vec<i32> = filtered.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2023, 2026]);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let records = vec![record(2024, "A")];
        assert_eq!(TimeRange::LastYears(2).filter(&records, 2026).len(), 1);
    }

    #[test]
    fn test_range_parsing() {
        assert_eq!("all".parse::<TimeRange>().unwrap(), TimeRange::All);
        assert_eq!("5".parse::<TimeRange>().unwrap(), TimeRange::LastYears(5));
        assert!("4".parse::<TimeRange>().is_err());
        assert!("".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_select_professors_subset() {
        let records = vec![record(2022, "Smith"), record(2022, "Jones")];
        let selection = vec!["Smith".to_string()];

        let selected = select_professors(&records, &selection);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].professor, "Smith");
    }

    #[test]
    fn test_empty_selection_yields_empty_set() {
        let records = vec![record(2022, "Smith")];
        assert!(select_professors(&records, &[]).is_empty());
    }
}

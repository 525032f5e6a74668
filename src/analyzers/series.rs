//! The four independent series builders.
//!
//! All four take the same filtered-and-selected record set; none depends on
//! another's output, so they may be computed in any order (or concurrently
//! over an immutable snapshot).

use std::collections::{BTreeMap, HashMap};

use crate::analyzers::types::{GpaSeries, GpaSeriesRow, YearShares};
use crate::records::{ClassRecord, GradeCounts, Term};

/// Builds the GPA-over-time matrix: one chronological row per term, one
/// column per professor in `professors` (which also fixes column order).
///
/// Cells hold the term-scoped enrollment-weighted average GPA rounded to
/// three decimals, or `None` when the professor has no defined-GPA record
/// that term. Records missing a year, professor, or GPA contribute nothing.
pub fn gpa_over_terms(records: &[ClassRecord], professors: &[String]) -> GpaSeries {
    let mut terms: BTreeMap<Term, HashMap<&str, (f64, f64)>> = BTreeMap::new();

    for r in records {
        let Some(gpa) = r.gpa else { continue };
        if r.year == 0 || r.professor.is_empty() {
            continue;
        }
        let entry = terms
            .entry(r.term())
            .or_default()
            .entry(r.professor.as_str())
            .or_insert((0.0, 0.0));
        let weight = r.total_students() as f64;
        entry.0 += gpa * weight;
        entry.1 += weight;
    }

    let rows = terms
        .into_iter()
        .map(|(term, by_prof)| GpaSeriesRow {
            term,
            values: professors
                .iter()
                .map(|prof| {
                    by_prof.get(prof.as_str()).and_then(|&(sum, weight)| {
                        if weight > 0.0 {
                            Some(round3(sum / weight))
                        } else {
                            None
                        }
                    })
                })
                .collect(),
        })
        .collect();

    GpaSeries {
        professors: professors.to_vec(),
        rows,
    }
}

/// Sums the seven letter counts across the whole record set (donut input).
/// Percentage rendering is the consumer's job; a zero total must render as
/// all-zero slices, never as a division.
pub fn grade_totals(records: &[ClassRecord]) -> GradeCounts {
    let mut totals = GradeCounts::default();
    for r in records {
        totals.add(&r.counts);
    }
    totals
}

/// Combined stacked series: per calendar year, the seven letter counts
/// normalized by that year's total, ascending by year.
pub fn stacked_by_year(records: &[ClassRecord]) -> Vec<YearShares> {
    let mut by_year: BTreeMap<i32, GradeCounts> = BTreeMap::new();
    for r in records {
        by_year.entry(r.year).or_default().add(&r.counts);
    }

    by_year
        .into_iter()
        .map(|(year, counts)| YearShares::from_counts(year, &counts))
        .collect()
}

/// Per-professor stacked series, aligned to the same year axis as the
/// combined series: a year where the professor has no data yields an
/// all-zero row, never an omitted one. Output preserves `professors` order.
pub fn stacked_by_professor(
    records: &[ClassRecord],
    professors: &[String],
) -> Vec<(String, Vec<YearShares>)> {
    let years: Vec<i32> = stacked_by_year(records).iter().map(|s| s.year).collect();

    professors
        .iter()
        .map(|prof| {
            let rows = years
                .iter()
                .map(|&year| {
                    let mut counts = GradeCounts::default();
                    for r in records
                        .iter()
                        .filter(|r| r.year == year && &r.professor == prof)
                    {
                        counts.add(&r.counts);
                    }
                    YearShares::from_counts(year, &counts)
                })
                .collect();
            (prof.clone(), rows)
        })
        .collect()
}

/// Whether a professor's stacked series has anything to show. The display
/// variant of the per-professor chart skips all-zero histories; the
/// underlying series keeps them.
pub fn has_any_shares(rows: &[YearShares]) -> bool {
    rows.iter().any(|r| !r.is_zero())
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

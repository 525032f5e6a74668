//! Collapsible-table grouping.
//!
//! Buckets records by `(year, semester, professor)`, synthesizes empty
//! buckets so every selected professor has a row for every observed term,
//! then computes per-group weighted GPA and letter totals. Groups with no
//! computable GPA are suppressed entirely.

use std::collections::{BTreeSet, HashMap};

use crate::analyzers::types::{GroupKey, TableGroup};
use crate::records::{ClassRecord, GradeCounts, Semester};

/// Buckets records by group key. Exposed separately so grouping can be
/// re-applied to a flattened result (it is idempotent).
pub fn bucket(records: &[ClassRecord]) -> HashMap<GroupKey, Vec<ClassRecord>> {
    let mut buckets: HashMap<GroupKey, Vec<ClassRecord>> = HashMap::new();
    for r in records {
        let key = GroupKey {
            year: r.year,
            semester: r.semester,
            professor: r.professor.clone(),
        };
        buckets.entry(key).or_default().push(r.clone());
    }
    buckets
}

/// Groups an already-filtered, already-selected record set for the table.
///
/// Every `(year, semester)` pair observed in the data is crossed with every
/// professor in `selection`; a combination with no records gets one
/// synthetic all-zero row so the table can show it, though such a group is
/// then suppressed by the GPA rule below. Output is sorted descending by
/// `(year, semester)`, professors alphabetical within a term.
pub fn group(records: &[ClassRecord], selection: &[String]) -> Vec<TableGroup> {
    let mut buckets = bucket(records);

    let observed_terms: BTreeSet<(i32, Semester)> =
        buckets.keys().map(|k| (k.year, k.semester)).collect();
    for &(year, semester) in &observed_terms {
        for prof in selection {
            let key = GroupKey {
                year,
                semester,
                professor: prof.clone(),
            };
            buckets
                .entry(key)
                .or_insert_with(|| vec![placeholder(year, semester, prof)]);
        }
    }

    let mut groups: Vec<TableGroup> = buckets
        .into_iter()
        .filter_map(|(key, rows)| {
            let mut weighted_sum = 0.0;
            let mut weight = 0.0;
            for r in &rows {
                let students = r.total_students();
                if let Some(gpa) = r.gpa {
                    if students > 0 {
                        weighted_sum += gpa * students as f64;
                        weight += students as f64;
                    }
                }
            }
            // No defined-GPA, nonzero-enrollment row: the group is not rendered.
            if weight == 0.0 {
                return None;
            }

            let mut counts = GradeCounts::default();
            for r in &rows {
                counts.add(&r.counts);
            }

            Some(TableGroup {
                key,
                avg_gpa: weighted_sum / weight,
                counts,
                rows,
            })
        })
        .collect();

    groups.sort_by(|a, b| {
        b.key
            .year
            .cmp(&a.key.year)
            .then(b.key.semester.cmp(&a.key.semester))
            .then(a.key.professor.cmp(&b.key.professor))
    });

    groups
}

fn placeholder(year: i32, semester: Semester, professor: &str) -> ClassRecord {
    ClassRecord {
        year,
        semester,
        professor: professor.to_string(),
        gpa: None,
        section: "-".to_string(),
        counts: GradeCounts::default(),
    }
}

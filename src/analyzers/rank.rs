//! Professor ranking by enrollment-weighted average GPA.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analyzers::types::{COLOR_PALETTE, ProfessorSummary};
use crate::records::ClassRecord;

/// Ranks every professor in `records` by enrollment-weighted average GPA,
/// descending, and assigns palette colors in rank order.
///
/// Records with an undefined GPA contribute nothing; a professor who never
/// taught a defined-GPA section does not appear at all. Ties keep first-seen
/// order (the sort is stable).
pub fn rank(records: &[ClassRecord]) -> Vec<ProfessorSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut acc: HashMap<&str, (f64, f64)> = HashMap::new();

    for r in records {
        let Some(gpa) = r.gpa else { continue };
        if r.professor.is_empty() {
            continue;
        }
        let entry = acc.entry(r.professor.as_str()).or_insert_with(|| {
            order.push(r.professor.as_str());
            (0.0, 0.0)
        });
        let weight = r.total_students() as f64;
        entry.0 += gpa * weight;
        entry.1 += weight;
    }

    let mut ranked: Vec<ProfessorSummary> = order
        .into_iter()
        .map(|prof| {
            let (weighted_sum, weight) = acc[prof];
            // Zero weight can only come from zero-enrollment sections;
            // fall back to 0.0 rather than dividing.
            let avg_gpa = if weight > 0.0 { weighted_sum / weight } else { 0.0 };
            ProfessorSummary {
                professor: prof.to_string(),
                avg_gpa,
                color: "",
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.avg_gpa
            .partial_cmp(&a.avg_gpa)
            .unwrap_or(Ordering::Equal)
    });

    for (idx, summary) in ranked.iter_mut().enumerate() {
        summary.color = COLOR_PALETTE[idx % COLOR_PALETTE.len()];
    }

    ranked
}

/// The top-ranked professor, or `None` for an empty input.
pub fn best(records: &[ClassRecord]) -> Option<ProfessorSummary> {
    rank(records).into_iter().next()
}

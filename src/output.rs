//! Output formatting and persistence for derived dashboard state.
//!
//! Supports JSON printing, CSV append of professor rankings, and a plain
//! text rendering of the grouped table.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::{ProfessorSummary, TableGroup};
use crate::pipeline::DerivedState;
use crate::records::GradeCounts;

/// Prints the full derived state as pretty JSON to stdout.
pub fn print_json(state: &DerivedState) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}

#[derive(Serialize)]
struct RankingRow<'a> {
    department: &'a str,
    course: &'a str,
    professor: &'a str,
    avg_gpa: f64,
    color: &'a str,
}

/// Appends one CSV row per ranked professor.
///
/// Creates the file with headers if it does not already exist.
pub fn append_rankings(
    path: &str,
    department: &str,
    course: &str,
    professors: &[ProfessorSummary],
) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending ranking rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for p in professors {
        writer.serialize(RankingRow {
            department,
            course,
            professor: &p.professor,
            avg_gpa: p.avg_gpa,
            color: p.color,
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Renders the grouped table as text: one group row with per-letter
/// `count (pct%)` columns, then the per-section child rows. Sections with
/// no defined GPA or no students are collapsed away, matching what the
/// table would show expanded.
pub fn render_table(groups: &[TableGroup]) -> String {
    let mut out = String::new();

    for group in groups {
        out.push_str(&format!("{} | GPA {:.2} |", group.key, group.avg_gpa));
        for (letter, count) in GradeCounts::LETTERS.iter().zip(group.counts.as_array()) {
            out.push_str(&format!(
                " {letter} {count} ({:.1}%)",
                group.percent(count)
            ));
        }
        out.push('\n');

        for row in &group.rows {
            let Some(gpa) = row.gpa else { continue };
            if row.total_students() == 0 {
                continue;
            }
            out.push_str(&format!("    section {} | GPA {gpa:.2} |", row.section));
            for (letter, count) in GradeCounts::LETTERS.iter().zip(row.counts.as_array()) {
                out.push_str(&format!(" {letter} {count}"));
            }
            out.push('\n');
        }
    }

    out
}

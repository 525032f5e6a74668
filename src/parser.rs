//! Normalizer for the upstream grade-distribution payload.
//!
//! Upstream fields arrive heterogeneously typed (numbers as strings, absent
//! keys, empty strings), so every field is parsed with a safe fallback:
//! counts and year degrade to 0, GPA to `None`, section to `"-"`. A malformed
//! row is never dropped.

use serde::Deserialize;
use serde_json::Value;

use crate::records::{ClassRecord, GradeCounts, Semester};

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    classes: Vec<RawClass>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawClass {
    year: Value,
    semester: Value,
    prof: Value,
    gpa: Value,
    section: Value,
    #[serde(rename = "A")]
    a: Value,
    #[serde(rename = "B")]
    b: Value,
    #[serde(rename = "C")]
    c: Value,
    #[serde(rename = "D")]
    d: Value,
    #[serde(rename = "F")]
    f: Value,
    #[serde(rename = "I")]
    i: Value,
    #[serde(rename = "Q")]
    q: Value,
}

/// Decodes the upstream JSON body into normalized [`ClassRecord`]s.
///
/// An empty or absent `classes` field yields an empty list; deciding whether
/// that means "no data found" is the caller's job.
///
/// # Errors
///
/// Returns an error only if the body is not valid JSON for the top-level
/// response shape. Individual rows never fail.
pub fn parse_response(body: &str) -> Result<Vec<ClassRecord>, serde_json::Error> {
    let raw: RawResponse = serde_json::from_str(body)?;
    Ok(raw.classes.iter().map(normalize).collect())
}

fn normalize(raw: &RawClass) -> ClassRecord {
    ClassRecord {
        year: int_field(&raw.year),
        semester: Semester::parse(&text_field(&raw.semester, "")),
        professor: text_field(&raw.prof, ""),
        gpa: gpa_field(&raw.gpa),
        section: text_field(&raw.section, "-"),
        counts: GradeCounts {
            a: count_field(&raw.a),
            b: count_field(&raw.b),
            c: count_field(&raw.c),
            d: count_field(&raw.d),
            f: count_field(&raw.f),
            i: count_field(&raw.i),
            q: count_field(&raw.q),
        },
    }
}

fn count_field(v: &Value) -> u32 {
    match v {
        Value::Number(n) => n.as_u64().map(|n| n as u32).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn int_field(v: &Value) -> i32 {
    match v {
        Value::Number(n) => n.as_i64().map(|n| n as i32).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn gpa_field(v: &Value) -> Option<f64> {
    let gpa = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    gpa.filter(|g| g.is_finite())
}

fn text_field(v: &Value, fallback: &str) -> String {
    match v {
        Value::String(s) if !s.is_empty() => s.clone(),
        _ => fallback.to_string(),
    }
}

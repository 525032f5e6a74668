use grade_lens::analyzers::filter::TimeRange;
use grade_lens::parser::parse_response;
use grade_lens::session::Session;

const FIXTURE: &str = include_str!("fixtures/sample_csce121.json");

#[test]
fn test_full_pipeline_over_fixture() {
    let records = parse_response(FIXTURE).expect("fixture should parse");
    assert_eq!(records.len(), 7);

    let mut session = Session::new(2026);
    let generation = session.begin_query();
    assert!(session.apply_response(generation, records));

    let derived = session.derived();

    // STAFF's only record has no GPA, so only two professors rank.
    let names: Vec<&str> = derived
        .professors
        .iter()
        .map(|p| p.professor.as_str())
        .collect();
    assert_eq!(names, vec!["CHEN L", "MOORE J"]);
    assert_eq!(session.selection().len(), 2);

    let best = derived.best_professor.as_ref().unwrap();
    assert_eq!(best.professor, "CHEN L");
    assert!(best.avg_gpa > 3.5 && best.avg_gpa < 3.7);

    // Four distinct terms carry defined-GPA records.
    assert_eq!(derived.gpa_series.rows.len(), 4);
    assert!(derived.gpa_series.rows.windows(2).all(|w| w[0].term < w[1].term));

    // Every year's stacked shares sum to 1 or are all zero.
    for shares in &derived.stacked_by_year {
        let sum: f64 = shares.as_array().iter().sum();
        assert!(shares.is_zero() || (sum - 1.0).abs() < 1e-9);
    }

    // Table groups are descending by term and all carry a computable GPA.
    let keys: Vec<(i32, _)> = derived
        .table
        .iter()
        .map(|g| (g.key.year, g.key.semester))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(keys, sorted);
    assert!(derived.table.iter().all(|g| g.counts.total() > 0));
}

#[test]
fn test_time_range_then_selection_changes() {
    // A 3-year window from 2025 keeps 2022 onward.
    let mut later = Session::new(2025);
    let generation = later.begin_query();
    later.apply_response(generation, parse_response(FIXTURE).unwrap());
    later.set_range(TimeRange::LastYears(3));

    // 2021 records fall outside the window.
    assert!(later
        .derived()
        .gpa_series
        .rows
        .iter()
        .all(|r| r.term.year >= 2022));

    later.set_selection(vec!["MOORE J".to_string()]);
    let derived = later.derived();
    assert_eq!(derived.best_professor.as_ref().unwrap().professor, "MOORE J");
    assert_eq!(derived.gpa_series.professors, vec!["MOORE J".to_string()]);
    assert!(derived.table.iter().all(|g| g.key.professor == "MOORE J"));
}

#[test]
fn test_empty_upstream_payload() {
    let records = parse_response(r#"{"classes": []}"#).unwrap();
    assert!(records.is_empty());

    let mut session = Session::new(2026);
    let generation = session.begin_query();
    session.apply_response(generation, records);

    assert!(session.derived().best_professor.is_none());
    assert!(session.derived().table.is_empty());
    assert!(session.selection().is_empty());
}

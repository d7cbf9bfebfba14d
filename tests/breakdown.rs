use completion_check::{
    breakdown::{BreakdownResult, compute},
    config::Vocabulary,
    error::AnalyzeError,
    ingest::JobTable,
};

fn mk_table(headers: &[&str], rows: &[&[&str]]) -> JobTable {
    JobTable {
        headers: headers.iter().map(|s| s.to_string()).collect(),
        records: rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    }
}

fn run(table: &JobTable) -> Result<BreakdownResult, AnalyzeError> {
    let v = Vocabulary::default();
    compute(
        table,
        &v.status_column_candidates,
        &v.expected_statuses,
        &v.completed_statuses,
    )
}

#[test]
fn worked_example() {
    let table = mk_table(
        &["id", "status"],
        &[
            &["1", "open"],
            &["2", "open"],
            &["3", "pending"],
            &["4", "Lead Reviewed"],
            &["5", "QA Reviewed"],
        ],
    );
    let b = run(&table).unwrap();

    assert_eq!(b.total_jobs, 5);
    assert_eq!(b.rows[0].status, "open");
    assert_eq!(b.rows[0].count, 2);
    assert_eq!(b.rows[0].percent, 40.0);
    assert_eq!(b.rows[1].count, 1);
    assert_eq!(b.rows[1].percent, 20.0);
    assert_eq!(b.rows[2].count, 1);
    assert_eq!(b.rows[3].count, 0);
    assert_eq!(b.rows[3].percent, 0.0);
    assert_eq!(b.rows[4].count, 1);
    assert_eq!(b.completed_count, 2);
    assert_eq!(b.completed_percent, 40.0);
}

#[test]
fn empty_input_yields_zero_percentages() {
    let table = mk_table(&["status"], &[]);
    let b = run(&table).unwrap();

    assert_eq!(b.total_jobs, 0);
    assert_eq!(b.completed_count, 0);
    assert_eq!(b.completed_percent, 0.0);
    for row in &b.rows {
        assert_eq!(row.count, 0);
        assert_eq!(row.percent, 0.0);
    }
}

#[test]
fn matching_is_case_sensitive() {
    let table = mk_table(&["status"], &[&["lead reviewed"]]);
    let b = run(&table).unwrap();

    assert_eq!(b.total_jobs, 1);
    assert_eq!(b.completed_count, 0);
    let lead = b.rows.iter().find(|r| r.status == "Lead Reviewed").unwrap();
    assert_eq!(lead.count, 0);
}

#[test]
fn first_candidate_column_wins() {
    // Both candidate names present; "status" is preferred over "M".
    let table = mk_table(&["M", "status"], &[&["pending", "open"]]);
    let b = run(&table).unwrap();

    assert_eq!(b.rows[0].count, 1); // open
    assert_eq!(b.rows[1].count, 0); // pending
}

#[test]
fn fallback_candidate_column() {
    let table = mk_table(&["id", "M"], &[&["1", "open"]]);
    let b = run(&table).unwrap();
    assert_eq!(b.rows[0].count, 1);
}

#[test]
fn missing_column_is_an_error() {
    let table = mk_table(&["name", "owner"], &[&["a", "b"]]);
    let err = run(&table).unwrap_err();
    assert!(matches!(err, AnalyzeError::MissingStatusColumn { .. }));
    assert!(err.to_string().contains("status"));
}

#[test]
fn headerless_table_is_missing_column() {
    let table = mk_table(&[], &[&["open"]]);
    let err = run(&table).unwrap_err();
    assert!(matches!(err, AnalyzeError::MissingStatusColumn { .. }));
}

#[test]
fn unknown_statuses_count_toward_total_only() {
    let table = mk_table(&["status"], &[&["open"], &["archived"], &["Archived "]]);
    let b = run(&table).unwrap();

    assert_eq!(b.total_jobs, 3);
    let row_sum: u64 = b.rows.iter().map(|r| r.count).sum();
    assert_eq!(row_sum, 1);
    assert_eq!(b.rows[0].percent, 33.33);
}

#[test]
fn rows_follow_vocabulary_order() {
    // Input order is reversed relative to the vocabulary.
    let table = mk_table(
        &["status"],
        &[
            &["QA Reviewed"],
            &["Manager Reviewed"],
            &["Lead Reviewed"],
            &["pending"],
            &["open"],
        ],
    );
    let b = run(&table).unwrap();

    let order: Vec<&str> = b.rows.iter().map(|r| r.status.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "open",
            "pending",
            "Lead Reviewed",
            "Manager Reviewed",
            "QA Reviewed"
        ]
    );
}

#[test]
fn completed_count_matches_completed_rows() {
    let v = Vocabulary::default();
    let table = mk_table(
        &["status"],
        &[
            &["open"],
            &["Lead Reviewed"],
            &["Lead Reviewed"],
            &["QA Reviewed"],
            &["mystery"],
        ],
    );
    let b = run(&table).unwrap();

    let completed_row_sum: u64 = b
        .rows
        .iter()
        .filter(|r| v.completed_statuses.contains(&r.status))
        .map(|r| r.count)
        .sum();
    assert_eq!(b.completed_count, completed_row_sum);
    assert_eq!(b.completed_count, 3);
    assert_eq!(b.completed_percent, 60.0);
}

#[test]
fn percentages_round_to_two_decimals() {
    let table = mk_table(&["status"], &[&["open"], &["open"], &["pending"]]);
    let b = run(&table).unwrap();

    assert_eq!(b.rows[0].percent, 66.67);
    assert_eq!(b.rows[1].percent, 33.33);
}

#[test]
fn short_rows_have_no_status() {
    // Row 2 has no cell under the status column; it still counts in the total.
    let table = mk_table(&["id", "status"], &[&["1", "open"], &["2"]]);
    let b = run(&table).unwrap();

    assert_eq!(b.total_jobs, 2);
    assert_eq!(b.rows[0].count, 1);
    assert_eq!(b.rows[0].percent, 50.0);
}

#[test]
fn alternate_vocabulary() {
    let table = mk_table(&["state"], &[&["todo"], &["done"], &["done"]]);
    let candidates = vec!["state".to_string()];
    let expected = vec!["todo".to_string(), "done".to_string()];
    let completed = vec!["done".to_string()];

    let b = compute(&table, &candidates, &expected, &completed).unwrap();
    assert_eq!(b.total_jobs, 3);
    assert_eq!(b.completed_count, 2);
    assert_eq!(b.completed_percent, 66.67);
}

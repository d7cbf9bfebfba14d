use completion_check::{
    breakdown::{BreakdownResult, StatusRow},
    document,
};

fn worked_breakdown() -> BreakdownResult {
    BreakdownResult {
        total_jobs: 5,
        rows: vec![
            StatusRow {
                status: "open".into(),
                count: 2,
                percent: 40.0,
            },
            StatusRow {
                status: "pending".into(),
                count: 1,
                percent: 20.0,
            },
            StatusRow {
                status: "Lead Reviewed".into(),
                count: 1,
                percent: 20.0,
            },
            StatusRow {
                status: "Manager Reviewed".into(),
                count: 0,
                percent: 0.0,
            },
            StatusRow {
                status: "QA Reviewed".into(),
                count: 1,
                percent: 20.0,
            },
        ],
        completed_count: 2,
        completed_percent: 40.0,
    }
}

#[test]
fn document_carries_title_summary_and_table() {
    let doc = document::render("Job Status Completion Report", &worked_breakdown());

    assert_eq!(doc.title, "Job Status Completion Report");
    assert_eq!(doc.summary[0], "Total Jobs: 5");
    assert_eq!(doc.summary[1], "Overall Completion: 40.0%");
    assert_eq!(doc.table.header, vec!["Status", "Jobs", "Percentage (%)"]);
}

#[test]
fn table_has_one_row_per_vocabulary_entry_in_order() {
    let b = worked_breakdown();
    let doc = document::render("t", &b);

    assert_eq!(doc.table.rows.len(), b.rows.len());
    for (cells, row) in doc.table.rows.iter().zip(&b.rows) {
        assert_eq!(cells[0], row.status);
        assert_eq!(cells[1], row.count.to_string());
    }
    assert_eq!(doc.table.rows[0], vec!["open", "2", "40.0"]);
    assert_eq!(doc.table.rows[3], vec!["Manager Reviewed", "0", "0.0"]);
}

#[test]
fn metric_formats_value_and_note() {
    let m = document::metric(&worked_breakdown());
    assert_eq!(m.value, "40.0%");
    assert_eq!(m.note, "2 of 5 jobs");
}

#[test]
fn percent_formatting_is_plain_decimal() {
    assert_eq!(document::fmt_percent(40.0), "40.0");
    assert_eq!(document::fmt_percent(0.0), "0.0");
    assert_eq!(document::fmt_percent(33.33), "33.33");
    assert_eq!(document::fmt_percent(66.67), "66.67");
    assert_eq!(document::fmt_percent(100.0), "100.0");
}

#[test]
fn markdown_rendering_contains_gfm_table() {
    let doc = document::render("Job Status Completion Report", &worked_breakdown());
    let md = doc.to_markdown();

    assert!(md.starts_with("# Job Status Completion Report\n"));
    assert!(md.contains("Total Jobs: 5"));
    assert!(md.contains("Overall Completion: 40.0%"));
    assert!(md.contains("| Status | Jobs | Percentage (%) |"));
    assert!(md.contains("|---|---|---|"));
    assert!(md.contains("| open | 2 | 40.0 |"));
    assert!(md.contains("| QA Reviewed | 1 | 20.0 |"));

    // header + separator + five data rows
    let table_lines = md.lines().filter(|l| l.starts_with('|')).count();
    assert_eq!(table_lines, 7);
}

#[test]
fn text_rendering_aligns_columns() {
    let doc = document::render("Job Status Completion Report", &worked_breakdown());
    let text = doc.to_text();

    assert!(text.contains("Status"));
    assert!(text.contains("Manager Reviewed"));
    let header_line = text
        .lines()
        .find(|l| l.starts_with("Status"))
        .expect("header line");
    // "Status" padded to the widest status, "Manager Reviewed".
    assert!(header_line.len() >= "Manager Reviewed".len());
}

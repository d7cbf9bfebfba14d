use crate::breakdown::BreakdownResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Content model handed to a rendering collaborator (terminal or PDF).
/// Built once per breakdown, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub title: String,
    pub summary: Vec<String>,
    pub table: ReportTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMetric {
    pub value: String,
    pub note: String,
}

/// Render a breakdown into the report content model: title, two summary
/// lines, and the per-status table in breakdown row order. Cell values are
/// stringified as-is; the percentage keeps its two-decimal rounding.
pub fn render(title: &str, breakdown: &BreakdownResult) -> ReportDocument {
    let summary = vec![
        format!("Total Jobs: {}", breakdown.total_jobs),
        format!(
            "Overall Completion: {}%",
            fmt_percent(breakdown.completed_percent)
        ),
    ];

    let header = vec![
        "Status".to_string(),
        "Jobs".to_string(),
        "Percentage (%)".to_string(),
    ];
    let rows = breakdown
        .rows
        .iter()
        .map(|r| {
            vec![
                r.status.clone(),
                r.count.to_string(),
                fmt_percent(r.percent),
            ]
        })
        .collect();

    ReportDocument {
        title: title.to_string(),
        summary,
        table: ReportTable { header, rows },
    }
}

/// The on-screen completion metric: headline value plus its annotation.
pub fn metric(breakdown: &BreakdownResult) -> CompletionMetric {
    CompletionMetric {
        value: format!("{}%", fmt_percent(breakdown.completed_percent)),
        note: format!(
            "{} of {} jobs",
            breakdown.completed_count, breakdown.total_jobs
        ),
    }
}

/// Shortest decimal form with at least one fractional digit:
/// 40 -> "40.0", 33.33 -> "33.33".
pub fn fmt_percent(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

impl ReportDocument {
    /// GFM rendering consumed by the PDF collaborator.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        for line in &self.summary {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');

        out.push_str(&format!("| {} |\n", self.table.header.join(" | ")));
        out.push_str(&format!(
            "|{}|\n",
            self.table
                .header
                .iter()
                .map(|_| "---")
                .collect::<Vec<_>>()
                .join("|")
        ));
        for row in &self.table.rows {
            out.push_str(&format!("| {} |\n", row.join(" | ")));
        }
        out
    }

    /// Column-aligned plain text for the terminal.
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.table.header.iter().map(|h| h.len()).collect();
        for row in &self.table.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        let fmt_row = |cells: &[String]| -> String {
            let parts: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let w = widths.get(i).copied().unwrap_or(c.len());
                    format!("{c:<w$}")
                })
                .collect();
            parts.join("  ").trim_end().to_string()
        };

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        for line in &self.summary {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&fmt_row(&self.table.header));
        out.push('\n');
        let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&dashes.join("  "));
        out.push('\n');
        for row in &self.table.rows {
            out.push_str(&fmt_row(row));
            out.push('\n');
        }
        out
    }
}

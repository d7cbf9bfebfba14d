use crate::{error::AnalyzeError, ingest::JobTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRow {
    pub status: String,
    pub count: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownResult {
    pub total_jobs: u64,
    pub rows: Vec<StatusRow>,
    pub completed_count: u64,
    pub completed_percent: f64,
}

/// First candidate present in the header row wins.
pub fn resolve_status_column(
    headers: &[String],
    candidates: &[String],
) -> Result<usize, AnalyzeError> {
    for cand in candidates {
        if let Some(idx) = headers.iter().position(|h| h == cand) {
            return Ok(idx);
        }
    }
    Err(AnalyzeError::MissingStatusColumn {
        candidates: candidates.to_vec(),
    })
}

/// Tally the status column against the configured vocabulary.
///
/// Matching is exact and case-sensitive; no trimming, no case folding.
/// Every data row counts toward `total_jobs`, but statuses outside the
/// vocabulary (and rows too short to have a status cell) get no row of
/// their own, so row counts need not sum to the total. Percentages are
/// `count / total * 100` rounded half away from zero to two decimals;
/// with zero input rows every percentage is 0 by definition.
pub fn compute(
    table: &JobTable,
    candidates: &[String],
    expected: &[String],
    completed: &[String],
) -> Result<BreakdownResult, AnalyzeError> {
    let status_idx = resolve_status_column(&table.headers, candidates)?;
    let total_jobs = table.records.len() as u64;

    let mut tally: HashMap<&str, u64> = HashMap::new();
    for rec in &table.records {
        if let Some(value) = rec.get(status_idx) {
            *tally.entry(value.as_str()).or_insert(0) += 1;
        }
    }

    let rows = expected
        .iter()
        .map(|status| {
            let count = tally.get(status.as_str()).copied().unwrap_or(0);
            StatusRow {
                status: status.clone(),
                count,
                percent: percent_of(count, total_jobs),
            }
        })
        .collect();

    let completed_count = completed
        .iter()
        .map(|s| tally.get(s.as_str()).copied().unwrap_or(0))
        .sum();

    Ok(BreakdownResult {
        total_jobs,
        rows,
        completed_count,
        completed_percent: percent_of(completed_count, total_jobs),
    })
}

fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

// half away from zero, two decimals
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

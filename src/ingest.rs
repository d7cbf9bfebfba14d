use crate::{config::Config, error::AnalyzeError, util::hash_file};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSummary {
    pub path: String,
    pub file_bytes: u64,
    pub sha256: String,
    pub record_count: u64,
}

/// Tabular input in memory: one header row plus data rows. All cells stay
/// free-form text; nothing beyond the status column is ever interpreted.
#[derive(Debug, Clone)]
pub struct JobTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub summary: InputSummary,
    pub table: JobTable,
}

pub fn load(cfg: &Config, input: &Path) -> Result<LoadedInput, AnalyzeError> {
    let meta = std::fs::metadata(input)?;
    let file_bytes = meta.len();
    if cfg.limits.max_input_file_bytes > 0 && file_bytes > cfg.limits.max_input_file_bytes {
        return Err(AnalyzeError::InputTooLarge {
            bytes: file_bytes,
            limit: cfg.limits.max_input_file_bytes,
        });
    }

    let file = std::fs::File::open(input)?;
    let table = read_table(cfg, file)?;
    let sha256 = hash_file(input)?;

    Ok(LoadedInput {
        summary: InputSummary {
            path: input.display().to_string(),
            file_bytes,
            sha256,
            record_count: table.records.len() as u64,
        },
        table,
    })
}

pub fn read_table<R: io::Read>(cfg: &Config, reader: R) -> Result<JobTable, AnalyzeError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(cfg.ingest.delimiter_byte())
        .has_headers(cfg.ingest.has_headers)
        .flexible(cfg.ingest.flexible)
        .from_reader(reader);

    let headers: Vec<String> = if cfg.ingest.has_headers {
        rdr.headers()?.iter().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    let mut records = Vec::new();
    let mut ragged = 0u64;
    for rec in rdr.records() {
        let rec = rec?;
        if cfg.limits.max_records > 0 && records.len() as u64 >= cfg.limits.max_records {
            return Err(AnalyzeError::TooManyRecords {
                limit: cfg.limits.max_records,
            });
        }
        if !headers.is_empty() && rec.len() != headers.len() {
            ragged += 1;
        }
        records.push(rec.iter().map(str::to_string).collect());
    }

    if ragged > 0 {
        warn!("{ragged} records have a different field count than the header row");
    }

    Ok(JobTable { headers, records })
}

use crate::{
    breakdown,
    config::Config,
    document::{self, ReportDocument},
    ingest, pdf,
    report::JobReport,
};
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub struct Pipeline {
    cfg: Config,
}

pub struct JobOutput {
    pub report: JobReport,
    pub document: ReportDocument,
    pub pdf: Option<Vec<u8>>,
}

impl Pipeline {
    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    pub fn run_job(&self, input: &Path) -> Result<JobOutput> {
        let loaded = ingest::load(&self.cfg, input)?;
        info!(
            "input records={} file_bytes={} sha256={}",
            loaded.summary.record_count, loaded.summary.file_bytes, loaded.summary.sha256
        );

        let vocab = &self.cfg.vocabulary;
        let result = breakdown::compute(
            &loaded.table,
            &vocab.status_column_candidates,
            &vocab.expected_statuses,
            &vocab.completed_statuses,
        )?;
        info!(
            "breakdown total_jobs={} completed={} completion={}%",
            result.total_jobs, result.completed_count, result.completed_percent
        );

        let doc = document::render(&self.cfg.report.title, &result);

        let pdf = if self.cfg.output.write_pdf {
            let bytes = pdf::pdf_bytes(&doc, &self.cfg.report.author)?;
            info!("pdf rendered bytes={}", bytes.len());
            Some(bytes)
        } else {
            None
        };

        Ok(JobOutput {
            report: JobReport {
                input: loaded.summary,
                breakdown: result,
            },
            document: doc,
            pdf,
        })
    }
}

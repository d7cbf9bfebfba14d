use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: Global,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub vocabulary: Vocabulary,
    #[serde(default)]
    pub ingest: Ingest,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub report: Report,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub debug: Debug,
    #[serde(default)]
    pub security: Security,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Configuration-time checks. A bad vocabulary is a config error,
    /// never a per-input runtime error.
    pub fn validate(&self) -> Result<()> {
        self.vocabulary.validate()?;
        self.ingest.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: Default::default(),
            paths: Default::default(),
            vocabulary: Default::default(),
            ingest: Default::default(),
            limits: Default::default(),
            report: Default::default(),
            output: Default::default(),
            logging: Default::default(),
            debug: Default::default(),
            security: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Global {
    pub job_name: String,
    pub print_summary: bool,
    pub overwrite: bool,
}
impl Default for Global {
    fn default() -> Self {
        Self {
            job_name: "default".into(),
            print_summary: true,
            overwrite: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    pub out_dir: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            out_dir: "out".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Header names accepted as the status column, in preference order.
    pub status_column_candidates: Vec<String>,
    /// Recognized status labels; order fixes the report row order.
    pub expected_statuses: Vec<String>,
    /// Subset of expected_statuses that counts as completed.
    pub completed_statuses: Vec<String>,
}
impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            status_column_candidates: vec!["status".into(), "M".into()],
            expected_statuses: vec![
                "open".into(),
                "pending".into(),
                "Lead Reviewed".into(),
                "Manager Reviewed".into(),
                "QA Reviewed".into(),
            ],
            completed_statuses: vec![
                "Lead Reviewed".into(),
                "Manager Reviewed".into(),
                "QA Reviewed".into(),
            ],
        }
    }
}
impl Vocabulary {
    pub fn validate(&self) -> Result<()> {
        if self.status_column_candidates.is_empty() {
            bail!("vocabulary.status_column_candidates must not be empty");
        }
        if self.expected_statuses.is_empty() {
            bail!("vocabulary.expected_statuses must not be empty");
        }
        for (i, s) in self.expected_statuses.iter().enumerate() {
            if self.expected_statuses[..i].contains(s) {
                bail!("vocabulary.expected_statuses contains duplicate: {s:?}");
            }
        }
        for (i, s) in self.completed_statuses.iter().enumerate() {
            if !self.expected_statuses.contains(s) {
                bail!("vocabulary.completed_statuses entry {s:?} is not in expected_statuses");
            }
            if self.completed_statuses[..i].contains(s) {
                bail!("vocabulary.completed_statuses contains duplicate: {s:?}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingest {
    /// Field delimiter, a single ASCII character.
    pub delimiter: String,
    pub has_headers: bool,
    /// Tolerate rows whose field count differs from the header row.
    pub flexible: bool,
}
impl Default for Ingest {
    fn default() -> Self {
        Self {
            delimiter: ",".into(),
            has_headers: true,
            flexible: true,
        }
    }
}
impl Ingest {
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.len() != 1 || !self.delimiter.is_ascii() {
            bail!(
                "ingest.delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            );
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    pub max_input_file_bytes: u64,
    /// 0 means unlimited.
    pub max_records: u64,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_file_bytes: 64 * 1024 * 1024,
            max_records: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub author: String,
}
impl Default for Report {
    fn default() -> Self {
        Self {
            title: "Job Status Completion Report".into(),
            author: "completion-check".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub write_report_json: bool,
    pub write_pdf: bool,
    pub write_index_json: bool,
    pub report_filename: String,
    pub pdf_filename: String,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            write_report_json: true,
            write_pdf: true,
            write_index_json: true,
            report_filename: "report.json".into(),
            pdf_filename: "job_status_completion_report.pdf".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debug {
    pub dump_effective_config: bool,
}
impl Default for Debug {
    fn default() -> Self {
        Self {
            dump_effective_config: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    pub reject_url_inputs: bool,
}
impl Default for Security {
    fn default() -> Self {
        Self {
            reject_url_inputs: true,
        }
    }
}

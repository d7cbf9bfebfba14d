use thiserror::Error;

/// Failures while turning one input file into a breakdown. Each is terminal
/// for that input; the caller reports it and waits for a fresh input.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("input has no status column; expected one of: {}", .candidates.join(", "))]
    MissingStatusColumn { candidates: Vec<String> },

    #[error("input is not parseable as CSV: {0}")]
    MalformedInput(#[from] csv::Error),

    #[error("reading input: {0}")]
    Io(#[from] std::io::Error),

    #[error("input exceeds limits.max_input_file_bytes: {bytes} > {limit}")]
    InputTooLarge { bytes: u64, limit: u64 },

    #[error("input exceeds limits.max_records: more than {limit} records")]
    TooManyRecords { limit: u64 },
}

use crate::{breakdown::BreakdownResult, ingest::InputSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    pub input: InputSummary,
    pub breakdown: BreakdownResult,
}

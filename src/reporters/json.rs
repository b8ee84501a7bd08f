//! JSON reporter
//!
//! Re-serializes the structured result as pretty-printed JSON. Useful for
//! piping to jq or validating a stored analysis file.

use crate::models::AnalysisResult;
use anyhow::Result;

pub fn render(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

//! Report command - render a stored analysis

use crate::error::{ReadinessError, ReadinessResult};
use crate::models::AnalysisResult;
use crate::reporters::{self, OutputFormat};
use anyhow::Result;
use console::style;
use std::path::Path;
use tracing::debug;

pub(super) fn run(analysis_file: &Path, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let result = load_analysis(analysis_file)?;
    debug!(
        "Rendering {} report for {} from {}",
        format,
        result.repo_name,
        analysis_file.display()
    );
    let rendered = reporters::report_with_format(&result, format)?;

    match output {
        Some(path) => {
            super::write_atomic(path, &rendered)?;
            println!("Report saved to: {}", style(path.display()).cyan());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Read a structured result written by `readiness analyze`
pub fn load_analysis(path: &Path) -> ReadinessResult<AnalysisResult> {
    if !path.exists() {
        return Err(ReadinessError::AnalysisNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| ReadinessError::InvalidAnalysis {
        path: path.to_path_buf(),
        source,
    })
}
